//! Multi-press disambiguation.
//!
//! Rapid presses of one button form a burst. Each confirmed press inside the
//! burst window of the previous press gets the next ordinal (1, 2, 3, ...).
//! Going past the maximum cancels the burst and reports ordinal 0; the press
//! after a cancellation always opens a new burst at 1.

use platform::{Duration, Instant};

/// Ordinal reported when a burst overflows.
pub const CANCELLED: u8 = 0;

/// Burst state for one button.
#[derive(Debug, Clone)]
pub struct MultiPress {
    window: Duration,
    max_ordinal: u8,
    count: u8,
    last_press: Option<Instant>,
}

impl MultiPress {
    /// Presses closer than `window` continue a burst of at most `max_ordinal`.
    pub const fn new(window: Duration, max_ordinal: u8) -> Self {
        Self {
            window,
            max_ordinal,
            count: 0,
            last_press: None,
        }
    }

    /// Register a confirmed press at `now` and return its ordinal.
    ///
    /// A press exactly `window` after the previous one starts a new burst.
    /// A timestamp earlier than the previous press counts as zero elapsed time.
    pub fn on_press(&mut self, now: Instant) -> u8 {
        let in_burst = self.count != CANCELLED
            && self.last_press.is_some_and(|last| {
                let elapsed = now
                    .checked_duration_since(last)
                    .unwrap_or(Duration::from_ticks(0));
                elapsed < self.window
            });

        self.count = if in_burst {
            match self.count.checked_add(1) {
                Some(next) if next <= self.max_ordinal => next,
                _ => {
                    debug!("burst exceeded {} presses, cancelled", self.max_ordinal);
                    CANCELLED
                }
            }
        } else {
            1
        };
        self.last_press = Some(now);
        self.count
    }

    /// Ordinal of the last press, 0 when idle or cancelled.
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Time after which the next press opens a new burst, while a burst is open.
    pub fn deadline(&self) -> Option<Instant> {
        if self.count == CANCELLED {
            return None;
        }
        self.last_press?.checked_add(self.window)
    }

    /// Forget the current burst.
    pub fn reset(&mut self) {
        self.count = CANCELLED;
        self.last_press = None;
    }
}
