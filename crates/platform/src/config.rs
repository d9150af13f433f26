//! Input configuration and constants
//!
//! Every tunable of the input core lives here: pin assignments, debounce and
//! burst timing, the option list, and how samples are delivered. A
//! configuration is validated once at startup; [`ConfigError`] is the only
//! error the input core treats as fatal.

use core::fmt;

use heapless::Vec;

use crate::gpio::{Edge, PinId};
use crate::input::{label, ButtonId, Label};
use crate::Duration;

/// The application name
pub const APP_NAME: &str = "Kiosk Input";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Debounce window for discrete buttons and the encoder switch (ms).
pub const DEFAULT_BUTTON_DEBOUNCE_MS: u32 = 50;

/// Debounce window for the encoder CLK/DT lines (ms).
///
/// Much shorter than the button window: a fast turn produces quadrature
/// phases only a few milliseconds apart.
pub const DEFAULT_ENCODER_DEBOUNCE_MS: u32 = 5;

/// Presses closer together than this belong to the same burst (ms).
pub const DEFAULT_BURST_WINDOW_MS: u32 = 1000;

/// Highest ordinal a burst reaches before it is cancelled.
pub const DEFAULT_MAX_ORDINAL: u8 = 3;

/// Sampling interval of the polling driver (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 5;

/// Rate at which the UI drains the event bus.
pub const UI_FRAME_HZ: u32 = 60;

/// Maximum number of button slots (discrete buttons plus the encoder switch).
pub const MAX_BUTTONS: usize = 8;

/// Maximum number of selectable options.
pub const MAX_OPTIONS: usize = 16;

/// Pins a configuration can claim: every button plus CLK and DT.
pub const MAX_PINS: usize = MAX_BUTTONS + 2;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Invalid input configuration. Fatal at startup, before any sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The option list is empty.
    EmptyOptions,
    /// More than [`MAX_OPTIONS`] options.
    TooManyOptions,
    /// An option label is longer than [`LABEL_CAPACITY`](crate::LABEL_CAPACITY) bytes.
    LabelTooLong,
    /// More than [`MAX_BUTTONS`] buttons including the encoder switch.
    TooManyButtons,
    /// The same pin is assigned twice.
    DuplicatePin(PinId),
    /// The same button id is used twice.
    DuplicateButtonId(ButtonId),
    /// `max_ordinal` is zero.
    ZeroMaxOrdinal,
    /// The encoder's active edge must be rising or falling.
    InvalidActiveEdge,
    /// Polling delivery with a zero interval.
    ZeroPollInterval,
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOptions => write!(f, "option list is empty"),
            Self::TooManyOptions => write!(f, "more than {MAX_OPTIONS} options"),
            Self::LabelTooLong => write!(
                f,
                "option label longer than {} bytes",
                crate::LABEL_CAPACITY
            ),
            Self::TooManyButtons => write!(f, "more than {MAX_BUTTONS} buttons"),
            Self::DuplicatePin(pin) => write!(f, "{pin} is assigned more than once"),
            Self::DuplicateButtonId(id) => write!(f, "{id} is configured more than once"),
            Self::ZeroMaxOrdinal => write!(f, "max_ordinal must be at least 1"),
            Self::InvalidActiveEdge => {
                write!(f, "encoder active edge must be rising or falling")
            }
            Self::ZeroPollInterval => write!(f, "poll interval must be at least 1 ms"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// What a confirmed press of a button does beyond reporting itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ButtonRole {
    /// Presses are grouped into bursts and reported with an ordinal.
    MultiPress,
    /// Each press moves the cursor one option forward.
    Scroll,
    /// Each press commits the highlighted option.
    Commit,
    /// Each press releases the current commitment.
    Clear,
    /// The press is only reported.
    Plain,
}

/// One discrete push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonConfig {
    /// Logical button number reported in events
    pub id: ButtonId,
    /// GPIO line
    pub pin: PinId,
    /// Behaviour on press
    pub role: ButtonRole,
}

/// Rotary quadrature encoder with optional integral push switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderConfig {
    /// Clock (A) line
    pub clk: PinId,
    /// Data (B) line
    pub dt: PinId,
    /// Push switch line; it behaves as a [`ButtonRole::Commit`] button.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sw: Option<PinId>,
    /// Button id reported for the push switch
    #[cfg_attr(feature = "serde", serde(default = "default_switch_id"))]
    pub sw_id: ButtonId,
    /// CLK transition that produces a step
    #[cfg_attr(feature = "serde", serde(default = "default_active_edge"))]
    pub active_edge: Edge,
    /// Flip the sign of every step (encoder mounted the other way round)
    #[cfg_attr(feature = "serde", serde(default))]
    pub reversed: bool,
}

/// Button id given to the encoder switch unless configured otherwise.
pub const DEFAULT_SWITCH_ID: ButtonId = ButtonId(0);

#[cfg(feature = "serde")]
fn default_switch_id() -> ButtonId {
    DEFAULT_SWITCH_ID
}

#[cfg(feature = "serde")]
fn default_active_edge() -> Edge {
    Edge::Falling
}

impl EncoderConfig {
    /// Encoder on `clk`/`dt` with an optional switch, stepping on the falling CLK edge.
    pub const fn new(clk: PinId, dt: PinId, sw: Option<PinId>) -> Self {
        Self {
            clk,
            dt,
            sw,
            sw_id: DEFAULT_SWITCH_ID,
            active_edge: Edge::Falling,
            reversed: false,
        }
    }
}

/// How the GPIO provider delivers samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Delivery {
    /// Every monitored pin is read on a fixed interval.
    Polling {
        /// Interval between reads (ms)
        interval_ms: u32,
    },
    /// Each transition invokes a callback asynchronously.
    EdgeCallback,
}

/// Complete input configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Discrete buttons
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
    /// Rotary encoder, if fitted
    pub encoder: Option<EncoderConfig>,
    /// Debounce window for buttons and the encoder switch (ms)
    pub button_debounce_ms: u32,
    /// Debounce window for CLK and DT (ms)
    pub encoder_debounce_ms: u32,
    /// Burst window for multi-press buttons (ms)
    pub burst_window_ms: u32,
    /// Highest burst ordinal before the burst is cancelled
    pub max_ordinal: u8,
    /// Buttons pull up and read low while pressed
    pub active_low: bool,
    /// Ordered, non-empty option list
    pub options: Vec<Label, MAX_OPTIONS>,
    /// Sample delivery mode
    pub delivery: Delivery,
}

impl InputConfig {
    /// Start building a configuration.
    pub fn builder() -> InputConfigBuilder {
        InputConfigBuilder::new()
    }

    /// Reference wiring for the kiosk board.
    ///
    /// | Signal          | GPIO | Role        |
    /// |-----------------|------|-------------|
    /// | Encoder CLK     | 17   |             |
    /// | Encoder DT      | 22   |             |
    /// | Encoder SW      | 27   | commit (id 0) |
    /// | Button 1        | 23   | multi-press |
    /// | Button 2        | 24   | scroll      |
    /// | Button 3        | 25   | commit      |
    /// | Button 4        | 26   | plain       |
    pub fn kiosk_default() -> Self {
        let mut buttons = Vec::new();
        let wiring = [
            (1, 23, ButtonRole::MultiPress),
            (2, 24, ButtonRole::Scroll),
            (3, 25, ButtonRole::Commit),
            (4, 26, ButtonRole::Plain),
        ];
        for (id, pin, role) in wiring {
            // Always fits: 4 < MAX_BUTTONS.
            buttons
                .push(ButtonConfig {
                    id: ButtonId(id),
                    pin: PinId(pin),
                    role,
                })
                .ok();
        }

        let mut options = Vec::new();
        for text in ["Option A", "Option B", "Option C", "Option D"] {
            if let Some(l) = label(text) {
                options.push(l).ok();
            }
        }

        Self {
            buttons,
            encoder: Some(EncoderConfig::new(PinId(17), PinId(22), Some(PinId(27)))),
            button_debounce_ms: DEFAULT_BUTTON_DEBOUNCE_MS,
            encoder_debounce_ms: DEFAULT_ENCODER_DEBOUNCE_MS,
            burst_window_ms: DEFAULT_BURST_WINDOW_MS,
            max_ordinal: DEFAULT_MAX_ORDINAL,
            active_low: true,
            options,
            delivery: Delivery::Polling {
                interval_ms: DEFAULT_POLL_INTERVAL_MS,
            },
        }
    }

    /// Check every rule a configuration must satisfy before sampling starts.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.options.is_empty() {
            return Err(ConfigError::EmptyOptions);
        }
        if self.max_ordinal == 0 {
            return Err(ConfigError::ZeroMaxOrdinal);
        }
        if let Delivery::Polling { interval_ms: 0 } = self.delivery {
            return Err(ConfigError::ZeroPollInterval);
        }

        let switch = self.encoder.and_then(|e| e.sw.map(|pin| (e.sw_id, pin)));
        let slots = self.buttons.len().saturating_add(usize::from(switch.is_some()));
        if slots > MAX_BUTTONS {
            return Err(ConfigError::TooManyButtons);
        }

        let mut pins: Vec<PinId, MAX_PINS> = Vec::new();
        let mut ids: Vec<ButtonId, MAX_BUTTONS> = Vec::new();

        for button in &self.buttons {
            claim(&mut pins, button.pin, ConfigError::DuplicatePin(button.pin))?;
            claim(&mut ids, button.id, ConfigError::DuplicateButtonId(button.id))?;
        }
        if let Some(encoder) = &self.encoder {
            if encoder.active_edge.target_level().is_none() {
                return Err(ConfigError::InvalidActiveEdge);
            }
            claim(&mut pins, encoder.clk, ConfigError::DuplicatePin(encoder.clk))?;
            claim(&mut pins, encoder.dt, ConfigError::DuplicatePin(encoder.dt))?;
        }
        if let Some((id, pin)) = switch {
            claim(&mut pins, pin, ConfigError::DuplicatePin(pin))?;
            claim(&mut ids, id, ConfigError::DuplicateButtonId(id))?;
        }
        Ok(())
    }

    /// Button debounce window.
    pub fn button_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.button_debounce_ms))
    }

    /// Encoder line debounce window.
    pub fn encoder_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.encoder_debounce_ms))
    }

    /// Multi-press burst window.
    pub fn burst_window(&self) -> Duration {
        Duration::from_millis(u64::from(self.burst_window_ms))
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::kiosk_default()
    }
}

/// Record `item` as used, failing with `err` if it already was.
fn claim<T: PartialEq, const N: usize>(
    used: &mut Vec<T, N>,
    item: T,
    err: ConfigError,
) -> Result<(), ConfigError> {
    if used.contains(&item) {
        return Err(err);
    }
    used.push(item).map_err(|_| ConfigError::TooManyButtons)
}

// ---------------------------------------------------------------------------
// InputConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`InputConfig`].
///
/// Starts with no buttons, no encoder and no options, and the default timing.
/// Capacity errors are remembered and reported by [`build`](Self::build),
/// which also runs [`InputConfig::validate`].
///
/// ```
/// use platform::{ButtonId, ButtonRole, ConfigError, InputConfig, PinId};
///
/// let err = InputConfig::builder()
///     .button(ButtonId(1), PinId(17), ButtonRole::Plain)
///     .encoder(PinId(17), PinId(22), None)
///     .options(&["Option A"])
///     .build()
///     .unwrap_err();
/// assert_eq!(err, ConfigError::DuplicatePin(PinId(17)));
/// ```
pub struct InputConfigBuilder {
    config: InputConfig,
    error: Option<ConfigError>,
}

impl InputConfigBuilder {
    fn new() -> Self {
        Self {
            config: InputConfig {
                buttons: Vec::new(),
                encoder: None,
                options: Vec::new(),
                ..InputConfig::kiosk_default()
            },
            error: None,
        }
    }

    fn fail(&mut self, err: ConfigError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Add a discrete button.
    #[must_use]
    pub fn button(mut self, id: ButtonId, pin: PinId, role: ButtonRole) -> Self {
        if self
            .config
            .buttons
            .push(ButtonConfig { id, pin, role })
            .is_err()
        {
            self.fail(ConfigError::TooManyButtons);
        }
        self
    }

    /// Fit a rotary encoder.
    #[must_use]
    pub fn encoder(mut self, clk: PinId, dt: PinId, sw: Option<PinId>) -> Self {
        self.config.encoder = Some(EncoderConfig::new(clk, dt, sw));
        self
    }

    /// Button id reported for the encoder switch.
    ///
    /// Only meaningful after [`encoder`](Self::encoder); silently ignored otherwise.
    #[must_use]
    pub fn encoder_switch_id(mut self, id: ButtonId) -> Self {
        if let Some(encoder) = self.config.encoder.as_mut() {
            encoder.sw_id = id;
        }
        self
    }

    /// CLK edge that produces a step. Ignored without an encoder.
    #[must_use]
    pub fn active_edge(mut self, edge: Edge) -> Self {
        if let Some(encoder) = self.config.encoder.as_mut() {
            encoder.active_edge = edge;
        }
        self
    }

    /// Flip the encoder direction. Ignored without an encoder.
    #[must_use]
    pub fn reversed(mut self, reversed: bool) -> Self {
        if let Some(encoder) = self.config.encoder.as_mut() {
            encoder.reversed = reversed;
        }
        self
    }

    /// Set the button debounce window in milliseconds.
    #[must_use]
    pub fn button_debounce_ms(mut self, ms: u32) -> Self {
        self.config.button_debounce_ms = ms;
        self
    }

    /// Set the encoder line debounce window in milliseconds.
    #[must_use]
    pub fn encoder_debounce_ms(mut self, ms: u32) -> Self {
        self.config.encoder_debounce_ms = ms;
        self
    }

    /// Set the multi-press burst window in milliseconds.
    #[must_use]
    pub fn burst_window_ms(mut self, ms: u32) -> Self {
        self.config.burst_window_ms = ms;
        self
    }

    /// Set the highest burst ordinal.
    #[must_use]
    pub fn max_ordinal(mut self, max: u8) -> Self {
        self.config.max_ordinal = max;
        self
    }

    /// Buttons read low (`true`, pull-up wiring) or high while pressed.
    #[must_use]
    pub fn active_low(mut self, active_low: bool) -> Self {
        self.config.active_low = active_low;
        self
    }

    /// Append options in order.
    #[must_use]
    pub fn options(mut self, labels: &[&str]) -> Self {
        for text in labels {
            self = self.option(text);
        }
        self
    }

    /// Append one option.
    #[must_use]
    pub fn option(mut self, text: &str) -> Self {
        match label(text) {
            Some(l) => {
                if self.config.options.push(l).is_err() {
                    self.fail(ConfigError::TooManyOptions);
                }
            }
            None => self.fail(ConfigError::LabelTooLong),
        }
        self
    }

    /// Select the delivery mode.
    #[must_use]
    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.config.delivery = delivery;
        self
    }

    /// Finish and validate.
    ///
    /// # Errors
    ///
    /// The first capacity error recorded while building, otherwise the first
    /// rule [`InputConfig::validate`] rejects.
    pub fn build(self) -> Result<InputConfig, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.config.validate()?;
        Ok(self.config)
    }
}
