//! Consumer-side UI model: menu state, overlay navigation, press actions.
//!
//! Folds the event stream of the input core into what a renderer needs for
//! the next frame. Rendering itself lives elsewhere.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless`.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod actions;
pub mod menu;
pub mod navigation;
pub mod screen;

pub use actions::PressAction;
pub use menu::MenuScreen;
pub use navigation::Navigator;
pub use screen::Screen;
