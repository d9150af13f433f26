//! Settings file loading.
//!
//! The settings file is the JSON form of [`InputConfig`]. Every field is
//! optional; missing fields take the kiosk reference wiring.
//!
//! ```json
//! {
//!   "buttons": [{ "id": 1, "pin": 23, "role": "multi-press" }],
//!   "encoder": { "clk": 17, "dt": 22, "sw": 27 },
//!   "button_debounce_ms": 30,
//!   "options": ["Browser", "Music", "Settings"],
//!   "delivery": "edge-callback"
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use platform::InputConfig;

/// Load and validate the settings at `path`, or the reference wiring if `None`.
pub fn load(path: Option<&Path>) -> Result<InputConfig> {
    let Some(path) = path else {
        tracing::info!("no settings file, using the reference wiring");
        return Ok(InputConfig::kiosk_default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))?;
    tracing::info!(path = %path.display(), "settings loaded");
    Ok(config)
}

/// Parse and validate settings JSON.
pub fn parse(text: &str) -> Result<InputConfig> {
    let config: InputConfig = serde_json::from_str(text).context("Malformed settings JSON")?;
    config.validate()?;
    Ok(config)
}
