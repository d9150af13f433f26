//! Kiosk front end for the input core.
//!
//! Loads the settings, feeds pin samples into an [`InputCore`] with the
//! configured delivery mode, and runs the UI loop that drains the event bus
//! once per frame.
//!
//! On a development host the pins come from a [`Script`]: a JSON list of
//! timed level changes replayed against the tokio clock.
//!
//! `demos/` at the workspace root has a settings file and a script that
//! scrolls, opens the time overlay, commits and clears:
//!
//! ```text
//! cargo run -p kiosk -- --config demos/settings.json --script demos/scroll_and_commit.json
//! ```

#![allow(missing_docs)]

pub mod clock;
pub mod consumer;
pub mod driver;
pub mod script;
pub mod settings;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use input::{InputCore, InputEvent};
use platform::{ButtonRole, InputConfig, Label, Level};
use ui::{MenuScreen, Screen};

pub use clock::Clock;
pub use consumer::Consumer;
pub use script::{Script, ScriptSample, ScriptedPins};

/// How long [`run`] keeps going and what it keeps.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Settle tick period for edge-callback delivery.
    pub settle_every: Duration,
    /// Stop after this long; `None` runs until Ctrl-C.
    pub stop_after: Option<Duration>,
    /// Keep every consumed event in [`Outcome::events`].
    pub record: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            settle_every: Duration::from_millis(5),
            stop_after: None,
            record: false,
        }
    }
}

/// State at shutdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub highlighted: Label,
    pub committed: Option<Label>,
    pub position: i64,
    pub dropped: u32,
    pub screen: Screen,
    pub events: Vec<InputEvent>,
}

/// Idle level of an unpressed input for the configured polarity.
pub fn idle_level(config: &InputConfig) -> Level {
    if config.active_low {
        Level::High
    } else {
        Level::Low
    }
}

/// Build the core for `config`, drive it from `script` and consume events
/// until `options.stop_after` elapses or Ctrl-C arrives.
pub async fn run(config: &InputConfig, script: Script, options: &RunOptions) -> Result<Outcome> {
    let core = Arc::new(InputCore::new(config)?);
    let clock = Clock::start();

    let mut menu = MenuScreen::new(core.current_option());
    if let Some(action) = config
        .buttons
        .iter()
        .find(|b| b.role == ButtonRole::MultiPress)
    {
        menu = menu.with_action_button(action.id);
    }
    let mut consumer = Consumer::new(menu);
    if options.record {
        consumer = consumer.recording();
    }

    tracing::info!(
        buttons = config.buttons.len(),
        encoder = config.encoder.is_some(),
        options = config.options.len(),
        samples = script.samples().len(),
        "input core ready"
    );

    let drive = driver::drive(
        Arc::clone(&core),
        Arc::new(script),
        config.delivery,
        options.settle_every,
        idle_level(config),
        clock,
    );
    let frames = consumer.run(&core, clock);
    let stop = async {
        match options.stop_after {
            Some(limit) => tokio::time::sleep(limit).await,
            None => {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            }
        }
    };

    tokio::select! {
        () = drive => tracing::warn!("driver stopped"),
        () = frames => tracing::warn!("UI loop stopped"),
        () = stop => tracing::info!("shutting down"),
    }

    // Pick up whatever was published after the last frame.
    consumer.frame(&core, clock.now());

    let menu = consumer.menu();
    let (highlighted, committed, screen) =
        (menu.highlighted().clone(), menu.committed().cloned(), menu.screen());
    Ok(Outcome {
        highlighted,
        committed,
        position: core.position(),
        dropped: core.dropped(),
        screen,
        events: consumer.into_history(),
    })
}
