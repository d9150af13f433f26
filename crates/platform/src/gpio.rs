//! GPIO pin identities, levels and samples
//!
//! The input core never touches hardware registers. A GPIO provider (polling
//! loop or interrupt callback) turns pin activity into [`PinSample`]s and the
//! core works purely on those.

use core::fmt;

use crate::Instant;

/// Logical identifier for a GPIO line (BCM numbering on the reference board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Logic level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl Level {
    /// Interpret a raw `0/1` sample. Any non-zero value reads as high.
    pub const fn from_raw(raw: u8) -> Self {
        if raw == 0 {
            Self::Low
        } else {
            Self::High
        }
    }

    /// The opposite level.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// Short name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<Level> for bool {
    fn from(value: Level) -> Self {
        matches!(value, Level::High)
    }
}

/// A confirmed level transition reported by a debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateChange {
    /// Stable level went from low to high.
    LowToHigh,
    /// Stable level went from high to low.
    HighToLow,
}

impl StateChange {
    /// The change that ends at `level`.
    pub const fn to(level: Level) -> Self {
        match level {
            Level::High => Self::LowToHigh,
            Level::Low => Self::HighToLow,
        }
    }

    /// Level the pin settled at.
    pub const fn new_level(self) -> Level {
        match self {
            Self::LowToHigh => Level::High,
            Self::HighToLow => Level::Low,
        }
    }
}

/// Which transition of a signal counts as its active edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Edge {
    /// Trigger on rising edge
    Rising,
    /// Trigger on falling edge
    Falling,
    /// Trigger on both edges
    Both,
}

impl Edge {
    /// Level a signal arrives at when this edge fires, or `None` for [`Edge::Both`].
    pub const fn target_level(self) -> Option<Level> {
        match self {
            Self::Rising => Some(Level::High),
            Self::Falling => Some(Level::Low),
            Self::Both => None,
        }
    }
}

/// One level observation delivered by the GPIO provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSample {
    /// Pin the level was read from.
    pub pin: PinId,
    /// Raw (undebounced) level.
    pub level: Level,
    /// Monotonic timestamp of the read or the interrupt.
    pub at: Instant,
}

impl PinSample {
    /// Create a sample.
    pub const fn new(pin: PinId, level: Level, at: Instant) -> Self {
        Self { pin, level, at }
    }
}

/// Polling-mode boundary to the GPIO provider.
///
/// Edge-triggered providers do not implement this; they push samples into the
/// input core from their callbacks instead.
pub trait PinReader {
    /// Error type
    type Error;

    /// Read the current raw level of `pin`.
    fn read(&mut self, pin: PinId) -> Result<Level, Self::Error>;
}
