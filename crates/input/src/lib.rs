//! Input decoding core for GPIO front panels
//!
//! Turns raw, bouncing pin levels into an ordered stream of logical
//! [`InputEvent`]s:
//!
//! ```text
//! PinSample ──► DebouncedButton ──► MultiPress ─┐
//!          │                                    ├──► OptionCursor ──► EventBus ──► UI
//!          └──► QuadratureDecoder ──────────────┘
//! ```
//!
//! [`InputCore`] wires one instance of each component to a validated
//! [`InputConfig`](platform::InputConfig). The components are usable on their
//! own as plain state machines; only the router and the bus synchronise.
//!
//! # Features
//!
//! - `tracing`: log through `tracing` (host builds)
//! - `defmt`: log through `defmt` and derive `defmt::Format` (embedded builds)
//! - `std`: implement `std::error::Error` for the error types
//!
//! # Example
//!
//! ```
//! use input::InputCore;
//! use platform::{InputConfig, InputEvent, Instant, Level, PinId, PinSample};
//!
//! let core = InputCore::new(&InputConfig::kiosk_default()).unwrap();
//!
//! // Encoder switch on GPIO27 pressed and held past the debounce window.
//! core.on_sample(PinSample::new(PinId(27), Level::Low, Instant::from_millis(0)));
//! core.tick(Instant::from_millis(50));
//!
//! let events = core.drain();
//! assert!(matches!(events.last(), Some(InputEvent::OptionCommitted { .. })));
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

#[cfg(feature = "std")]
extern crate std;

// Must come first: the logging macros are textually scoped.
#[macro_use]
mod fmt;

pub mod burst;
pub mod bus;
pub mod debounce;
pub mod quadrature;
pub mod router;
pub mod selection;

pub use burst::MultiPress;
pub use bus::{BusReader, EventBus};
pub use debounce::DebouncedButton;
pub use quadrature::{EncoderLine, Phase, QuadratureDecoder, StepDetector};
pub use router::{InputCore, BUS_DEPTH};
pub use selection::{AlreadyCommitted, OptionCursor};

pub use platform::{InputDevice, InputEvent};
