//! Rotary quadrature decoding.
//!
//! The encoder has two lines, CLK (A) and DT (B), 90° out of phase. Turning
//! clockwise, CLK reaches its active level while DT still holds the opposite
//! level; counter-clockwise, DT got there first.
//!
//! ```text
//!            clockwise                 counter-clockwise
//! CLK  ‾‾‾‾\_______/‾‾‾‾‾‾        ‾‾‾‾‾‾‾\_______/‾‾‾‾
//! DT   ‾‾‾‾‾‾‾\_______/‾‾‾        ‾‾‾‾\_______/‾‾‾‾‾‾‾
//!          ^ step +1                     ^ step -1
//! ```
//!
//! [`StepDetector`] is the decoding core and only ever sees debounced levels.
//! [`QuadratureDecoder`] puts a [`DebouncedButton`] in front of each line.
//!
//! Only a CLK transition onto the active level can produce a step, and only
//! once per detent: after a step, CLK has to return to its inactive level
//! before the next step is accepted. DT transitions only update DT's stored
//! level. Bounce on either line therefore never counts a detent twice.

use platform::{ConfigError, Duration, EncoderConfig, Instant, Level, PinId, PinSample};

use crate::debounce::DebouncedButton;

/// One of the two encoder lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderLine {
    /// Clock (A)
    Clk,
    /// Data (B)
    Dt,
}

/// Combined stable state of both lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Both lines high (detent rest position with pull-ups)
    Idle,
    /// Only CLK low
    ClkLow,
    /// Only DT low
    DtLow,
    /// Both lines low
    BothLow,
}

impl Phase {
    /// Phase for the given stable levels.
    pub const fn from_levels(clk: Level, dt: Level) -> Self {
        match (clk, dt) {
            (Level::High, Level::High) => Self::Idle,
            (Level::Low, Level::High) => Self::ClkLow,
            (Level::High, Level::Low) => Self::DtLow,
            (Level::Low, Level::Low) => Self::BothLow,
        }
    }
}

// ---------------------------------------------------------------------------
// StepDetector
// ---------------------------------------------------------------------------

/// Decoder core fed with debounced line levels.
#[derive(Debug, Clone)]
pub struct StepDetector {
    clk: Level,
    dt: Level,
    /// CLK level that produces a step
    active: Level,
    /// CLK level at the last step or re-arm
    baseline: Level,
    reversed: bool,
    position: i64,
}

impl StepDetector {
    /// Detector stepping when CLK reaches `active`. Both lines start at the
    /// opposite (rest) level.
    pub const fn new(active: Level, reversed: bool) -> Self {
        let rest = active.inverted();
        Self {
            clk: rest,
            dt: rest,
            active,
            baseline: rest,
            reversed,
            position: 0,
        }
    }

    /// Apply a debounced level of one line. Returns the step, if this
    /// transition completed one.
    pub fn on_level(&mut self, line: EncoderLine, level: Level) -> Option<i32> {
        match line {
            EncoderLine::Dt => {
                self.dt = level;
                None
            }
            EncoderLine::Clk => {
                if level == self.clk {
                    return None;
                }
                self.clk = level;
                if level != self.active {
                    self.baseline = level;
                    return None;
                }
                if self.baseline == self.active {
                    return None;
                }
                self.baseline = level;

                let clockwise = self.dt != level;
                let delta = if clockwise != self.reversed { 1 } else { -1 };
                self.position = self.position.saturating_add(i64::from(delta));
                debug!("encoder step {} (position {})", delta, self.position);
                Some(delta)
            }
        }
    }

    /// Net detents turned since construction.
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Current phase of the two lines.
    pub const fn phase(&self) -> Phase {
        Phase::from_levels(self.clk, self.dt)
    }
}

// ---------------------------------------------------------------------------
// QuadratureDecoder
// ---------------------------------------------------------------------------

/// Debounced quadrature decoder over two pins.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    clk: DebouncedButton,
    dt: DebouncedButton,
    detector: StepDetector,
}

impl QuadratureDecoder {
    /// Decoder for `config`, debouncing both lines with `window`.
    pub fn new(config: &EncoderConfig, window: Duration) -> Result<Self, ConfigError> {
        let active = config
            .active_edge
            .target_level()
            .ok_or(ConfigError::InvalidActiveEdge)?;
        let rest = active.inverted();
        Ok(Self {
            clk: DebouncedButton::new(config.clk, window, rest),
            dt: DebouncedButton::new(config.dt, window, rest),
            detector: StepDetector::new(active, config.reversed),
        })
    }

    /// The line `pin` is wired to, if any.
    pub fn line_for(&self, pin: PinId) -> Option<EncoderLine> {
        if pin == self.clk.pin() {
            Some(EncoderLine::Clk)
        } else if pin == self.dt.pin() {
            Some(EncoderLine::Dt)
        } else {
            None
        }
    }

    /// CLK and DT pins.
    pub fn pins(&self) -> [PinId; 2] {
        [self.clk.pin(), self.dt.pin()]
    }

    /// Feed a sample for any pin; other pins are ignored.
    pub fn on_sample(&mut self, sample: &PinSample) -> Option<i32> {
        let line = self.line_for(sample.pin)?;
        self.on_edge(line, sample.level, sample.at)
    }

    /// Feed one raw level of `line` observed at `now`.
    ///
    /// Changes of either line that matured before `now` are confirmed first,
    /// so a step always sees the DT level that was stable at the time.
    pub fn on_edge(&mut self, line: EncoderLine, raw: Level, now: Instant) -> Option<i32> {
        let settled = self.poll(now);
        let step = self
            .filter(line)
            .sample(raw, now)
            .and_then(|change| self.detector.on_level(line, change.new_level()));
        settled.or(step)
    }

    /// Confirm any line whose window elapsed by `now`, earliest change first.
    pub fn poll(&mut self, now: Instant) -> Option<i32> {
        let order = match (self.clk.pending_since(), self.dt.pending_since()) {
            (Some(clk), Some(dt)) if dt < clk => [EncoderLine::Dt, EncoderLine::Clk],
            _ => [EncoderLine::Clk, EncoderLine::Dt],
        };
        let mut step = None;
        for line in order {
            if let Some(change) = self.filter(line).poll(now) {
                step = self.detector.on_level(line, change.new_level()).or(step);
            }
        }
        step
    }

    /// Net detents turned since construction.
    pub const fn position(&self) -> i64 {
        self.detector.position()
    }

    /// Phase of the debounced lines.
    pub const fn phase(&self) -> Phase {
        self.detector.phase()
    }

    fn filter(&mut self, line: EncoderLine) -> &mut DebouncedButton {
        match line {
            EncoderLine::Clk => &mut self.clk,
            EncoderLine::Dt => &mut self.dt,
        }
    }
}
