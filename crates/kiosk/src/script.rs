//! Recorded pin activity standing in for the GPIO provider.
//!
//! A script is a JSON array of raw samples, times in milliseconds since
//! start:
//!
//! ```json
//! [
//!   { "pin": 27, "level": "low",  "t_ms": 1000 },
//!   { "pin": 27, "level": "high", "t_ms": 1004 },
//!   { "pin": 27, "level": "low",  "t_ms": 1008 },
//!   { "pin": 27, "level": "high", "t_ms": 1300 }
//! ]
//! ```
//!
//! The edge-callback driver replays every entry as one callback. The polling
//! driver reads pins through [`ScriptedPins`], which reports the level of the
//! latest entry at or before the current time.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use platform::{Level, PinId, PinReader};
use serde::Deserialize;

use crate::clock::Clock;

/// One raw level change at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptSample {
    /// Pin the level appears on
    pub pin: PinId,
    /// Raw level
    pub level: Level,
    /// Milliseconds since start
    pub t_ms: u64,
}

/// Time-ordered pin activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    samples: Vec<ScriptSample>,
}

impl Script {
    /// Script from samples in any order. Entries with equal times keep their order.
    pub fn new(mut samples: Vec<ScriptSample>) -> Self {
        samples.sort_by_key(|s| s.t_ms);
        Self { samples }
    }

    /// Read a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script =
            Self::parse(&text).with_context(|| format!("Invalid script {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            samples = script.samples.len(),
            end_ms = script.end_ms(),
            "script loaded"
        );
        Ok(script)
    }

    /// Parse script JSON.
    pub fn parse(text: &str) -> Result<Self> {
        let samples: Vec<ScriptSample> =
            serde_json::from_str(text).context("Malformed script JSON")?;
        Ok(Self::new(samples))
    }

    /// All samples, oldest first.
    pub fn samples(&self) -> &[ScriptSample] {
        &self.samples
    }

    /// Samples of one pin, oldest first.
    pub fn samples_for(&self, pin: PinId) -> impl Iterator<Item = &ScriptSample> + '_ {
        self.samples.iter().filter(move |s| s.pin == pin)
    }

    /// Every pin the script touches.
    pub fn pins(&self) -> BTreeSet<PinId> {
        self.samples.iter().map(|s| s.pin).collect()
    }

    /// Time of the last sample.
    pub fn end_ms(&self) -> u64 {
        self.samples.last().map_or(0, |s| s.t_ms)
    }

    /// Level of `pin` at `t_ms`, if the script set one by then.
    pub fn level_at(&self, pin: PinId, t_ms: u64) -> Option<Level> {
        self.samples
            .iter()
            .take_while(|s| s.t_ms <= t_ms)
            .filter(|s| s.pin == pin)
            .last()
            .map(|s| s.level)
    }
}

/// [`PinReader`] answering from a [`Script`] at the current clock time.
///
/// Pins before their first entry, or never mentioned, read as `idle`.
#[derive(Debug, Clone)]
pub struct ScriptedPins {
    script: Arc<Script>,
    clock: Clock,
    idle: Level,
}

impl ScriptedPins {
    /// Reader over `script`, timed by `clock`.
    pub fn new(script: Arc<Script>, clock: Clock, idle: Level) -> Self {
        Self {
            script,
            clock,
            idle,
        }
    }
}

impl PinReader for ScriptedPins {
    type Error = Infallible;

    fn read(&mut self, pin: PinId) -> Result<Level, Self::Error> {
        Ok(self
            .script
            .level_at(pin, self.clock.elapsed_ms())
            .unwrap_or(self.idle))
    }
}
