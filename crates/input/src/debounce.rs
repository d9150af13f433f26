//! Per-pin debounce filter.
//!
//! A [`DebouncedButton`] turns a stream of raw level samples from one pin into
//! confirmed [`StateChange`]s. A new level is only confirmed after the raw
//! level has stayed constant for the whole debounce window; every raw change
//! restarts the window.
//!
//! ```text
//! raw     ‾‾‾‾‾\_/‾\______________________
//!               ^   ^                ^
//!               |   pending restarts |
//!               pending starts       window elapsed -> HighToLow
//! ```

use platform::{Duration, Instant, Level, PinId, PinSample, StateChange};

/// Debounce state for a single pin.
#[derive(Debug, Clone)]
pub struct DebouncedButton {
    pin: PinId,
    window: Duration,
    stable: Level,
    last_raw: Option<Level>,
    pending_since: Instant,
    last_sample_at: Option<Instant>,
    last_transition_at: Option<Instant>,
}

impl DebouncedButton {
    /// Filter for `pin`, starting at `idle_level` (the released level).
    pub const fn new(pin: PinId, window: Duration, idle_level: Level) -> Self {
        Self {
            pin,
            window,
            stable: idle_level,
            last_raw: None,
            pending_since: Instant::from_ticks(0),
            last_sample_at: None,
            last_transition_at: None,
        }
    }

    /// Pin this filter monitors.
    pub const fn pin(&self) -> PinId {
        self.pin
    }

    /// Debounce window.
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Last confirmed level.
    pub const fn stable_level(&self) -> Level {
        self.stable
    }

    /// Time of the last confirmed change, if any.
    pub const fn last_transition(&self) -> Option<Instant> {
        self.last_transition_at
    }

    /// Start of the current unconfirmed change, if the raw level differs from
    /// the stable one.
    pub fn pending_since(&self) -> Option<Instant> {
        match self.last_raw {
            Some(raw) if raw != self.stable => Some(self.pending_since),
            _ => None,
        }
    }

    /// Feed a sample delivered for any pin. Samples for other pins are ignored.
    pub fn on_sample(&mut self, sample: &PinSample) -> Option<StateChange> {
        if sample.pin != self.pin {
            return None;
        }
        self.sample(sample.level, sample.at)
    }

    /// Feed one raw level observed at `now`.
    ///
    /// A sample older than the previous one is dropped without touching any
    /// state.
    pub fn sample(&mut self, raw: Level, now: Instant) -> Option<StateChange> {
        if let Some(last) = self.last_sample_at {
            if now < last {
                trace!(
                    "GPIO{}: sample at {} ms older than {} ms, ignored",
                    self.pin.0,
                    now.as_millis(),
                    last.as_millis()
                );
                return None;
            }
        }
        self.last_sample_at = Some(now);

        if self.last_raw != Some(raw) {
            self.last_raw = Some(raw);
            self.pending_since = now;
        }
        self.evaluate(now)
    }

    /// Re-evaluate the last raw level at `now` without recording a sample.
    ///
    /// Confirms a level whose window elapsed after the final raw transition,
    /// when no further sample arrives to trigger the check.
    pub fn poll(&mut self, now: Instant) -> Option<StateChange> {
        self.evaluate(now)
    }

    fn evaluate(&mut self, now: Instant) -> Option<StateChange> {
        let raw = self.last_raw?;
        if raw == self.stable {
            return None;
        }
        let held = now.checked_duration_since(self.pending_since)?;
        if held < self.window {
            return None;
        }

        self.stable = raw;
        self.last_transition_at = Some(now);
        debug!(
            "GPIO{}: confirmed {} at {} ms",
            self.pin.0,
            raw.as_str(),
            now.as_millis()
        );
        Some(StateChange::to(raw))
    }
}
