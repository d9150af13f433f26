//! Scripted runs through both delivery modes on tokio's paused clock.
//!
//! Polling and edge-callback delivery see the same pin activity through
//! different paths; the consumer must observe the same event stream.

// Test files legitimately use arithmetic and unwrap for verification; allow at file level.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use kiosk::{Outcome, RunOptions, Script, ScriptSample};
use platform::{label, ButtonId, Delivery, InputConfig, InputEvent, Level, PinId};
use ui::Screen;

const POLLING: Delivery = Delivery::Polling { interval_ms: 5 };

fn sample(pin: u8, level: Level, t_ms: u64) -> ScriptSample {
    ScriptSample {
        pin: PinId(pin),
        level,
        t_ms,
    }
}

async fn replay(delivery: Delivery, script: Script) -> Outcome {
    let mut config = InputConfig::kiosk_default();
    config.delivery = delivery;
    let options = RunOptions {
        settle_every: Duration::from_millis(5),
        stop_after: Some(Duration::from_millis(script.end_ms() + 1000)),
        record: true,
    };
    kiosk::run(&config, script, &options).await.unwrap()
}

fn option(text: &str) -> platform::Label {
    label(text).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_scroll_press_same_in_both_modes() {
    // Scroll button on GPIO24, active low.
    let script = Script::new(vec![
        sample(24, Level::Low, 100),
        sample(24, Level::High, 300),
    ]);
    let expected = [
        InputEvent::ButtonPress {
            id: ButtonId(2),
            ordinal: 1,
        },
        InputEvent::OptionChanged {
            label: option("Option B"),
        },
        InputEvent::ButtonRelease { id: ButtonId(2) },
    ];

    let polled = replay(POLLING, script.clone()).await;
    assert_eq!(polled.events, expected);

    let edged = replay(Delivery::EdgeCallback, script).await;
    assert_eq!(edged.events, polled.events);
    assert_eq!(edged.highlighted, option("Option B"));
    assert_eq!(edged.dropped, 0);
}

#[tokio::test(start_paused = true)]
async fn test_bouncy_commit_press_counts_once() {
    // Commit button on GPIO25 bouncing for 8 ms.
    let script = Script::new(vec![
        sample(25, Level::Low, 100),
        sample(25, Level::High, 104),
        sample(25, Level::Low, 108),
        sample(25, Level::High, 400),
    ]);
    for delivery in [POLLING, Delivery::EdgeCallback] {
        let outcome = replay(delivery, script.clone()).await;
        assert_eq!(
            outcome.events,
            [
                InputEvent::ButtonPress {
                    id: ButtonId(3),
                    ordinal: 1,
                },
                InputEvent::OptionCommitted {
                    label: option("Option A"),
                },
                InputEvent::ButtonRelease { id: ButtonId(3) },
            ]
        );
        assert_eq!(outcome.committed, Some(option("Option A")));
    }
}

#[tokio::test(start_paused = true)]
async fn test_encoder_detent_same_in_both_modes() {
    // One clockwise detent on CLK 17 / DT 22.
    let script = Script::new(vec![
        sample(17, Level::Low, 100),
        sample(22, Level::Low, 110),
        sample(17, Level::High, 120),
        sample(22, Level::High, 130),
    ]);
    let polled = replay(POLLING, script.clone()).await;
    let edged = replay(Delivery::EdgeCallback, script).await;

    assert_eq!(
        polled.events,
        [
            InputEvent::EncoderStep { delta: 1 },
            InputEvent::OptionChanged {
                label: option("Option B"),
            },
        ]
    );
    assert_eq!(edged.events, polled.events);
    assert_eq!(polled.position, 1);
    assert_eq!(edged.position, 1);
}

#[tokio::test(start_paused = true)]
async fn test_double_press_opens_time_overlay() {
    // Multi-press button on GPIO23: two presses inside the burst window.
    let script = Script::new(vec![
        sample(23, Level::Low, 100),
        sample(23, Level::High, 200),
        sample(23, Level::Low, 400),
        sample(23, Level::High, 500),
    ]);
    let outcome = replay(Delivery::EdgeCallback, script).await;
    let ordinals: Vec<u8> = outcome
        .events
        .iter()
        .filter_map(|e| match e {
            InputEvent::ButtonPress { ordinal, .. } => Some(*ordinal),
            _ => None,
        })
        .collect();
    assert_eq!(ordinals, [1, 2]);
    assert_eq!(outcome.screen, Screen::TimeOverlay);
}

#[tokio::test(start_paused = true)]
async fn test_idle_pins_produce_no_events() {
    let outcome = replay(POLLING, Script::default()).await;
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.highlighted, option("Option A"));
    assert_eq!(outcome.screen, Screen::Menu);
}
