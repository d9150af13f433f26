//! Shared input types for the kiosk front end
//!
//! This crate defines the vocabulary every other crate speaks: GPIO pin
//! identities and levels, the samples a GPIO provider delivers, the logical
//! events the input core emits, the shared monotonic clock, and the input
//! configuration with its validation rules.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (kiosk crate: delivery drivers, UI loop, CLI)
//!         ↓
//! Feature Layers (input core, ui view model)
//!         ↓
//! Platform types (this crate)
//!         ↓
//! GPIO / interrupt provider (external collaborator)
//! ```
//!
//! # Features
//!
//! - `std`: implement `std::error::Error` for the error types
//! - `serde`: derive `Serialize`/`Deserialize` on the configuration types
//! - `defmt`: derive `defmt::Format` on all types
//!
//! # Example
//!
//! ```
//! use platform::{InputConfig, PinId};
//!
//! let config = InputConfig::builder()
//!     .encoder(PinId(17), PinId(22), Some(PinId(27)))
//!     .options(&["Option A", "Option B"])
//!     .build()
//!     .unwrap();
//! assert_eq!(config.options.len(), 2);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single consumer per device, Send bounds not needed

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod gpio;
pub mod input;

/// Monotonic clock types shared by every component.
///
/// Debounce windows, burst windows and sample timestamps are all expressed in
/// these types so ordering comparisons stay valid across components.
pub use embassy_time::{Duration, Instant};

pub use config::{
    ButtonConfig, ButtonRole, ConfigError, Delivery, EncoderConfig, InputConfig,
    InputConfigBuilder,
};
pub use gpio::{Edge, Level, PinId, PinReader, PinSample, StateChange};
pub use input::{label, ButtonId, InputDevice, InputEvent, Label, LABEL_CAPACITY};
