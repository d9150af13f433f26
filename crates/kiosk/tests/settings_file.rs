//! Settings and script files read from disk.

#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used)]

use std::io::Write;

use kiosk::{settings, Script};
use platform::{ButtonRole, Delivery, InputConfig, PinId};

fn write_temp(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_settings_file() {
    let file = write_temp(
        r#"{
            "buttons": [{ "id": 1, "pin": 5, "role": "scroll" }],
            "encoder": null,
            "options": ["Browser", "Music"],
            "delivery": "edge-callback"
        }"#,
    );
    let config = settings::load(Some(file.path())).unwrap();
    assert_eq!(config.buttons.len(), 1);
    assert_eq!(config.buttons[0].pin, PinId(5));
    assert_eq!(config.buttons[0].role, ButtonRole::Scroll);
    assert_eq!(config.encoder, None);
    assert_eq!(config.options.len(), 2);
    assert_eq!(config.delivery, Delivery::EdgeCallback);
    assert_eq!(
        config.button_debounce_ms,
        InputConfig::kiosk_default().button_debounce_ms
    );
}

#[test]
fn test_missing_settings_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = settings::load(Some(&path)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to read settings file"));
    assert!(message.contains("absent.json"));
}

#[test]
fn test_invalid_settings_file_names_the_path() {
    let file = write_temp(r#"{ "options": [] }"#);
    let err = settings::load(Some(file.path())).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Invalid settings in"));
    assert!(message.contains("option list is empty"));
}

#[test]
fn test_load_script_file() {
    let file = write_temp(
        r#"[
            { "pin": 24, "level": "high", "t_ms": 300 },
            { "pin": 24, "level": "low", "t_ms": 100 }
        ]"#,
    );
    let script = Script::load(file.path()).unwrap();
    assert_eq!(script.samples().len(), 2);
    assert_eq!(script.end_ms(), 300);
}
