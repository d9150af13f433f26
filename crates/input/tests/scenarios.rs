//! End-to-end scenarios: fixed timelines through the public API, and
//! concurrent delivery from several threads.

// Test files legitimately use arithmetic and unwrap for verification; allow at file level.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use input::{DebouncedButton, EventBus, InputCore, MultiPress, OptionCursor};
use platform::{
    label, ButtonId, ButtonRole, Duration, InputConfig, InputEvent, Instant, Level, PinId,
    PinSample, StateChange,
};

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

#[test]
fn test_scroll_three_then_wrap() {
    let mut cursor =
        OptionCursor::from_labels(&["Option A", "Option B", "Option C", "Option D"]).unwrap();
    for _ in 0..3 {
        cursor.apply_step(1);
    }
    assert_eq!(cursor.index(), 3);
    assert_eq!(cursor.current_option(), "Option D");
    cursor.apply_step(1);
    assert_eq!(cursor.index(), 0);
    assert_eq!(cursor.current_option(), "Option A");
}

#[test]
fn test_burst_timeline() {
    let mut burst = MultiPress::new(Duration::from_millis(1000), 3);
    let ordinals: Vec<u8> = [0, 300, 600, 900, 2000]
        .into_iter()
        .map(|t| burst.on_press(at(t)))
        .collect();
    assert_eq!(ordinals, [1, 2, 3, 0, 1]);
}

#[test]
fn test_debounce_timeline() {
    let pin = PinId(26);
    let mut button = DebouncedButton::new(pin, Duration::from_millis(30), Level::High);
    let mut confirmed = Vec::new();
    let raw = [(0, Level::Low), (10, Level::High), (15, Level::Low)];
    let sustained = (20..=60).step_by(5).map(|t| (t, Level::Low));
    for (t, level) in raw.into_iter().chain(sustained) {
        if let Some(change) = button.on_sample(&PinSample::new(pin, level, at(t))) {
            confirmed.push((t, change));
        }
    }
    assert_eq!(confirmed, [(45, StateChange::HighToLow)]);
}

#[test]
fn test_commit_twice_then_clear() {
    let core = InputCore::new(&InputConfig::kiosk_default()).unwrap();
    assert!(core.commit().is_ok());
    assert!(core.commit().is_err());
    assert!(core.clear_commit().is_some());
    assert!(core.commit().is_ok());

    let committed = core
        .drain()
        .into_iter()
        .filter(|e| matches!(e, InputEvent::OptionCommitted { .. }))
        .count();
    assert_eq!(committed, 2);
}

#[test]
fn test_kiosk_wiring_end_to_end() {
    let core = InputCore::new(&InputConfig::kiosk_default()).unwrap();
    let sample = |pin: u8, level: Level, t: u64| {
        core.on_sample(PinSample::new(PinId(pin), level, at(t)));
    };

    // Two detents clockwise on CLK 17 / DT 22 (5 ms encoder debounce).
    for base in [0, 100] {
        sample(17, Level::Low, base);
        sample(22, Level::Low, base + 10);
        sample(17, Level::High, base + 20);
        sample(22, Level::High, base + 30);
        core.tick(at(base + 40));
    }
    // Commit with the encoder switch on GPIO27 (50 ms button debounce).
    sample(27, Level::Low, 300);
    core.tick(at(350));
    sample(27, Level::High, 400);
    core.tick(at(450));

    let option = |text: &str| label(text).unwrap();
    assert_eq!(
        core.drain().as_slice(),
        &[
            InputEvent::EncoderStep { delta: 1 },
            InputEvent::OptionChanged {
                label: option("Option B")
            },
            InputEvent::EncoderStep { delta: 1 },
            InputEvent::OptionChanged {
                label: option("Option C")
            },
            InputEvent::ButtonPress {
                id: ButtonId(0),
                ordinal: 1
            },
            InputEvent::OptionCommitted {
                label: option("Option C")
            },
            InputEvent::ButtonRelease { id: ButtonId(0) },
        ]
    );
    assert_eq!(core.position(), 2);
}

#[test]
fn test_polled_encoder_reaches_cursor() {
    let core = InputCore::new(&InputConfig::kiosk_default()).unwrap();
    // CLK 17 / DT 22 read every 5 ms; one clockwise detent then one
    // counter-clockwise, no settle ticks.
    let clk_low = |t: u64| (100..140).contains(&t) || (220..260).contains(&t);
    let dt_low = |t: u64| (120..160).contains(&t) || (200..240).contains(&t);
    let level = |low: bool| if low { Level::Low } else { Level::High };
    for t in (0..400).step_by(5) {
        core.on_sample(PinSample::new(PinId(17), level(clk_low(t)), at(t)));
        core.on_sample(PinSample::new(PinId(22), level(dt_low(t)), at(t)));
    }

    let option = |text: &str| label(text).unwrap();
    assert_eq!(
        core.drain().as_slice(),
        &[
            InputEvent::EncoderStep { delta: 1 },
            InputEvent::OptionChanged {
                label: option("Option B")
            },
            InputEvent::EncoderStep { delta: -1 },
            InputEvent::OptionChanged {
                label: option("Option A")
            },
        ]
    );
    assert_eq!(core.position(), 0);
}

#[test]
fn test_concurrent_publishers_drained_exactly_once() {
    const PRODUCERS: i32 = 4;
    const PER_PRODUCER: i32 = 50;
    let bus: EventBus<256> = EventBus::new();

    let mut seen: Vec<i32> = Vec::new();
    thread::scope(|s| {
        for p in 0..PRODUCERS {
            let bus = &bus;
            s.spawn(move || {
                for i in 0..PER_PRODUCER {
                    assert!(bus.publish(InputEvent::EncoderStep {
                        delta: p * 1000 + i
                    }));
                }
            });
        }
        while seen.len() < (PRODUCERS * PER_PRODUCER) as usize {
            for event in bus.drain() {
                if let InputEvent::EncoderStep { delta } = event {
                    seen.push(delta);
                }
            }
            thread::yield_now();
        }
    });

    assert_eq!(bus.dropped(), 0);
    assert!(bus.drain().is_empty());
    // Per-producer FIFO order survives interleaving.
    for p in 0..PRODUCERS {
        let mine: Vec<i32> = seen.iter().copied().filter(|d| d / 1000 == p).collect();
        let expected: Vec<i32> = (0..PER_PRODUCER).map(|i| p * 1000 + i).collect();
        assert_eq!(mine, expected);
    }
}

#[test]
fn test_concurrent_button_callbacks() {
    let config = InputConfig::builder()
        .button(ButtonId(1), PinId(5), ButtonRole::Plain)
        .button(ButtonId(2), PinId(6), ButtonRole::Plain)
        .button(ButtonId(3), PinId(13), ButtonRole::Plain)
        .button_debounce_ms(0)
        .options(&["Option A"])
        .build()
        .unwrap();
    let core = Arc::new(InputCore::new(&config).unwrap());

    let handles: Vec<_> = [5u8, 6, 13]
        .into_iter()
        .map(|pin| {
            let core = Arc::clone(&core);
            thread::spawn(move || {
                for n in 0..5u64 {
                    core.on_sample(PinSample::new(PinId(pin), Level::Low, at(n * 10)));
                    core.on_sample(PinSample::new(PinId(pin), Level::High, at(n * 10 + 5)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = core.drain();
    assert_eq!(events.len(), 30);
    for id in [1u8, 2, 3] {
        let mine: Vec<&InputEvent> = events
            .iter()
            .filter(|e| match e {
                InputEvent::ButtonPress { id: b, .. } | InputEvent::ButtonRelease { id: b } => {
                    b.0 == id
                }
                _ => false,
            })
            .collect();
        assert_eq!(mine.len(), 10);
        for pair in mine.chunks(2) {
            assert!(matches!(pair[0], InputEvent::ButtonPress { ordinal: 1, .. }));
            assert!(matches!(pair[1], InputEvent::ButtonRelease { .. }));
        }
    }
}
