//! Input router.
//!
//! [`InputCore`] owns one debounce filter per button, the quadrature decoder
//! and the option cursor, and publishes everything they produce on one
//! [`EventBus`]. It is `Sync`: delivery tasks (one per pin, or one polling
//! loop) share it behind an `Arc` and call [`InputCore::on_sample`] and
//! [`InputCore::tick`] concurrently.
//!
//! # Locking
//!
//! Each button slot, the decoder and the cursor sit behind their own
//! critical-section mutex. Lock order is always component first, cursor
//! second. Events are published while the producing lock is held, so the bus
//! order matches the order the state changed.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use platform::config::{MAX_BUTTONS, MAX_PINS};
use platform::{
    ButtonId, ButtonRole, ConfigError, InputConfig, InputEvent, Instant, Label, Level, PinId,
    PinSample, StateChange,
};

use crate::burst::MultiPress;
use crate::bus::{BusReader, EventBus};
use crate::debounce::DebouncedButton;
use crate::quadrature::QuadratureDecoder;
use crate::selection::{AlreadyCommitted, OptionCursor};

/// Depth of the event bus.
pub const BUS_DEPTH: usize = 32;

type Guarded<T> = Mutex<CriticalSectionRawMutex, RefCell<T>>;

fn guarded<T>(value: T) -> Guarded<T> {
    Mutex::new(RefCell::new(value))
}

// ---------------------------------------------------------------------------
// ButtonSlot
// ---------------------------------------------------------------------------

/// What a confirmed button change amounts to.
enum ButtonOutcome {
    Press {
        id: ButtonId,
        ordinal: u8,
        role: ButtonRole,
    },
    Release {
        id: ButtonId,
    },
}

/// One button with its filter and optional burst counter.
///
/// Await-release state is the filter's stable level: confirmed changes
/// alternate, so every press is followed by exactly one release before the
/// next press, however long the button is held.
struct ButtonSlot {
    id: ButtonId,
    role: ButtonRole,
    pressed: Level,
    filter: DebouncedButton,
    burst: Option<MultiPress>,
}

impl ButtonSlot {
    fn new(id: ButtonId, pin: PinId, role: ButtonRole, config: &InputConfig) -> Self {
        let pressed = if config.active_low {
            Level::Low
        } else {
            Level::High
        };
        let burst = match role {
            ButtonRole::MultiPress => {
                Some(MultiPress::new(config.burst_window(), config.max_ordinal))
            }
            _ => None,
        };
        Self {
            id,
            role,
            pressed,
            filter: DebouncedButton::new(pin, config.button_debounce(), pressed.inverted()),
            burst,
        }
    }

    /// Settle a level that matured before `sample`, then apply the sample.
    /// Outcomes are returned in that order.
    fn on_sample(&mut self, sample: &PinSample) -> [Option<ButtonOutcome>; 2] {
        let settled = self.poll(sample.at);
        let change = self
            .filter
            .on_sample(sample)
            .and_then(|change| self.on_change(change, sample.at));
        [settled, change]
    }

    fn poll(&mut self, now: Instant) -> Option<ButtonOutcome> {
        let change = self.filter.poll(now)?;
        self.on_change(change, now)
    }

    fn on_change(&mut self, change: StateChange, at: Instant) -> Option<ButtonOutcome> {
        if change.new_level() == self.pressed {
            let ordinal = self.burst.as_mut().map_or(1, |burst| burst.on_press(at));
            debug!("button {}: press, ordinal {}", self.id.0, ordinal);
            Some(ButtonOutcome::Press {
                id: self.id,
                ordinal,
                role: self.role,
            })
        } else {
            debug!("button {}: release", self.id.0);
            Some(ButtonOutcome::Release { id: self.id })
        }
    }
}

// ---------------------------------------------------------------------------
// InputCore
// ---------------------------------------------------------------------------

/// Every input component of one device, wired to one event bus.
pub struct InputCore {
    buttons: Vec<Guarded<ButtonSlot>, MAX_BUTTONS>,
    encoder: Option<Guarded<QuadratureDecoder>>,
    cursor: Guarded<OptionCursor>,
    bus: EventBus<BUS_DEPTH>,
    pins: Vec<PinId, MAX_PINS>,
}

impl InputCore {
    /// Validate `config` and build every component it describes.
    pub fn new(config: &InputConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut buttons = Vec::new();
        let mut pins = Vec::new();
        for button in &config.buttons {
            let slot = ButtonSlot::new(button.id, button.pin, button.role, config);
            buttons
                .push(guarded(slot))
                .map_err(|_| ConfigError::TooManyButtons)?;
            pins.push(button.pin)
                .map_err(|_| ConfigError::TooManyButtons)?;
        }

        let encoder = match &config.encoder {
            Some(encoder) => {
                if let Some(sw) = encoder.sw {
                    let slot = ButtonSlot::new(encoder.sw_id, sw, ButtonRole::Commit, config);
                    buttons
                        .push(guarded(slot))
                        .map_err(|_| ConfigError::TooManyButtons)?;
                    pins.push(sw).map_err(|_| ConfigError::TooManyButtons)?;
                }
                let decoder = QuadratureDecoder::new(encoder, config.encoder_debounce())?;
                for pin in decoder.pins() {
                    pins.push(pin).map_err(|_| ConfigError::TooManyButtons)?;
                }
                Some(guarded(decoder))
            }
            None => None,
        };

        let cursor = OptionCursor::new(config.options.clone())?;
        info!(
            "input core ready: {} buttons, encoder {}, {} options",
            buttons.len(),
            encoder.is_some(),
            cursor.len()
        );

        Ok(Self {
            buttons,
            encoder,
            cursor: guarded(cursor),
            bus: EventBus::new(),
            pins,
        })
    }

    /// Route one delivered sample to the component monitoring its pin.
    pub fn on_sample(&self, sample: PinSample) {
        for slot in &self.buttons {
            let routed = slot.lock(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.filter.pin() != sample.pin {
                    return false;
                }
                for outcome in slot.on_sample(&sample).into_iter().flatten() {
                    self.dispatch(outcome);
                }
                true
            });
            if routed {
                return;
            }
        }

        if let Some(encoder) = &self.encoder {
            let routed = encoder.lock(|cell| {
                let mut decoder = cell.borrow_mut();
                if decoder.line_for(sample.pin).is_none() {
                    return false;
                }
                if let Some(delta) = decoder.on_sample(&sample) {
                    self.publish_step(delta);
                }
                true
            });
            if routed {
                return;
            }
        }

        trace!("GPIO{}: not monitored, sample ignored", sample.pin.0);
    }

    /// Settle tick: confirm every level whose debounce window elapsed by `now`.
    pub fn tick(&self, now: Instant) {
        for slot in &self.buttons {
            slot.lock(|cell| {
                if let Some(outcome) = cell.borrow_mut().poll(now) {
                    self.dispatch(outcome);
                }
            });
        }
        if let Some(encoder) = &self.encoder {
            encoder.lock(|cell| {
                if let Some(delta) = cell.borrow_mut().poll(now) {
                    self.publish_step(delta);
                }
            });
        }
    }

    /// Commit the highlighted option unless a commitment is held.
    pub fn commit(&self) -> Result<Label, AlreadyCommitted> {
        self.cursor.lock(|cell| self.commit_locked(&mut cell.borrow_mut()))
    }

    /// Release the commitment, publishing [`InputEvent::CommitCleared`] if one was held.
    pub fn clear_commit(&self) -> Option<Label> {
        self.cursor.lock(|cell| {
            let released = cell.borrow_mut().clear_commit()?;
            info!("commitment \"{}\" cleared", released.as_str());
            self.bus.publish(InputEvent::CommitCleared {
                label: released.clone(),
            });
            Some(released)
        })
    }

    /// Highlighted option.
    pub fn current_option(&self) -> Label {
        self.cursor
            .lock(|cell| cell.borrow().current_option().clone())
    }

    /// Held commitment.
    pub fn committed(&self) -> Option<Label> {
        self.cursor.lock(|cell| cell.borrow().committed().cloned())
    }

    /// Net encoder detents since startup, 0 without an encoder.
    pub fn position(&self) -> i64 {
        self.encoder
            .as_ref()
            .map_or(0, |encoder| encoder.lock(|cell| cell.borrow().position()))
    }

    /// Every monitored pin: buttons, encoder switch, CLK and DT.
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    /// Take every event published since the last drain.
    pub fn drain(&self) -> Vec<InputEvent, BUS_DEPTH> {
        self.bus.drain()
    }

    /// Subscribing consumer of the bus.
    pub fn reader(&self) -> BusReader<'_, BUS_DEPTH> {
        self.bus.reader()
    }

    /// The bus itself.
    pub fn bus(&self) -> &EventBus<BUS_DEPTH> {
        &self.bus
    }

    /// Events lost to a full bus.
    pub fn dropped(&self) -> u32 {
        self.bus.dropped()
    }

    // -- helpers, called with the producing component locked ---------------

    fn dispatch(&self, outcome: ButtonOutcome) {
        match outcome {
            ButtonOutcome::Release { id } => {
                self.bus.publish(InputEvent::ButtonRelease { id });
            }
            ButtonOutcome::Press { id, ordinal, role } => self.cursor.lock(|cell| {
                let mut cursor = cell.borrow_mut();
                self.bus.publish(InputEvent::ButtonPress { id, ordinal });
                match role {
                    ButtonRole::Scroll => self.step_locked(&mut cursor, 1),
                    ButtonRole::Commit => {
                        // Repeat commits are expected; the result is only logged.
                        let _ = self.commit_locked(&mut cursor);
                    }
                    ButtonRole::Clear => {
                        if let Some(released) = cursor.clear_commit() {
                            info!("commitment \"{}\" cleared", released.as_str());
                            self.bus
                                .publish(InputEvent::CommitCleared { label: released });
                        }
                    }
                    ButtonRole::MultiPress | ButtonRole::Plain => {}
                }
            }),
        }
    }

    fn publish_step(&self, delta: i32) {
        self.cursor.lock(|cell| {
            self.bus.publish(InputEvent::EncoderStep { delta });
            self.step_locked(&mut cell.borrow_mut(), delta);
        });
    }

    fn step_locked(&self, cursor: &mut OptionCursor, delta: i32) {
        cursor.apply_step(delta);
        let label = cursor.current_option().clone();
        debug!("option {} \"{}\"", cursor.index(), label.as_str());
        self.bus.publish(InputEvent::OptionChanged { label });
    }

    fn commit_locked(&self, cursor: &mut OptionCursor) -> Result<Label, AlreadyCommitted> {
        match cursor.commit() {
            Ok(label) => {
                info!("committed \"{}\"", label.as_str());
                self.bus.publish(InputEvent::OptionCommitted {
                    label: label.clone(),
                });
                Ok(label)
            }
            Err(already) => {
                debug!("commit ignored, \"{}\" already held", already.held.as_str());
                Err(already)
            }
        }
    }
}
