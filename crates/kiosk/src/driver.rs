//! Sample delivery drivers.
//!
//! Both drivers feed the same [`InputCore`]; which one runs is a deployment
//! choice ([`Delivery`]):
//!
//! | Mode            | Source                          | Settling                  |
//! |-----------------|---------------------------------|---------------------------|
//! | Polling         | every pin read each interval    | the next read             |
//! | Edge callback   | one task per pin, one call per edge | periodic settle tick  |
//!
//! With edge delivery no callback follows the last bounce of a transition, so
//! a separate settle tick confirms levels once their window elapses.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use input::InputCore;
use platform::{Delivery, Level, PinReader, PinSample};
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};

use crate::clock::Clock;
use crate::script::{Script, ScriptedPins};

/// Read every monitored pin each `every` and feed the core. Runs until cancelled.
pub async fn poll_pins<R>(core: Arc<InputCore>, mut reader: R, clock: Clock, every: Duration)
where
    R: PinReader,
    R::Error: fmt::Display,
{
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_ms = millis(every), "polling driver started");
    loop {
        ticker.tick().await;
        let now = clock.now();
        for &pin in core.pins() {
            match reader.read(pin) {
                Ok(level) => core.on_sample(PinSample::new(pin, level, now)),
                Err(e) => tracing::warn!(%pin, error = %e, "pin read failed, sample skipped"),
            }
        }
    }
}

/// Replay each script entry as an edge callback at its time, one task per pin.
/// Returns once the script is exhausted.
pub async fn replay_edges(core: Arc<InputCore>, script: Arc<Script>, clock: Clock) {
    let mut tasks = JoinSet::new();
    for pin in script.pins() {
        let core = Arc::clone(&core);
        let script = Arc::clone(&script);
        tasks.spawn(async move {
            for sample in script.samples_for(pin) {
                clock.sleep_until_ms(sample.t_ms).await;
                tracing::trace!(%pin, level = sample.level.as_str(), "edge");
                core.on_sample(PinSample::new(pin, sample.level, clock.now()));
            }
        });
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "edge replay task failed");
        }
    }
    tracing::info!("edge replay finished");
}

/// Confirm settled levels every `every`. Runs until cancelled.
pub async fn settle(core: Arc<InputCore>, clock: Clock, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        core.tick(clock.now());
    }
}

/// Run the driver `delivery` selects against `script`. Unscripted pins rest
/// at `idle`. Runs until cancelled.
pub async fn drive(
    core: Arc<InputCore>,
    script: Arc<Script>,
    delivery: Delivery,
    settle_every: Duration,
    idle: Level,
    clock: Clock,
) {
    match delivery {
        Delivery::Polling { interval_ms } => {
            let pins = ScriptedPins::new(script, clock, idle);
            let every = Duration::from_millis(u64::from(interval_ms));
            poll_pins(core, pins, clock, every).await;
        }
        Delivery::EdgeCallback => {
            tracing::info!(settle_ms = millis(settle_every), "edge-callback driver started");
            tokio::join!(
                replay_edges(Arc::clone(&core), script, clock),
                settle(core, clock, settle_every)
            );
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
