//! Input device abstraction

/// Maximum length in bytes of an option label.
pub const LABEL_CAPACITY: usize = 32;

/// Bounded option label (no heap).
pub type Label = heapless::String<LABEL_CAPACITY>;

/// Build a [`Label`] from `text`, or `None` when it exceeds [`LABEL_CAPACITY`].
pub fn label(text: &str) -> Option<Label> {
    let mut out = Label::new();
    out.push_str(text).ok()?;
    Some(out)
}

/// Input device trait for consumers of the event stream
pub trait InputDevice {
    /// Wait for next input event (async, power-efficient)
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = InputEvent>;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Logical button number.
///
/// Discrete buttons and the encoder's integral switch each get one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ButtonId(pub u8);

impl core::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "button {}", self.0)
    }
}

/// Logical events emitted by the input core, consumed in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Confirmed press. `ordinal` is the position within a multi-press burst
    /// (1, 2, 3, ...); 0 means the burst overflowed and was cancelled.
    /// Buttons without burst handling always report 1.
    ButtonPress {
        /// Button that was pressed
        id: ButtonId,
        /// Position within the burst
        ordinal: u8,
    },
    /// Confirmed release of a pressed button.
    ButtonRelease {
        /// Button that was released
        id: ButtonId,
    },
    /// One encoder detent (positive = clockwise)
    EncoderStep {
        /// +1 or -1
        delta: i32,
    },
    /// The highlighted option changed.
    OptionChanged {
        /// Newly highlighted option
        label: Label,
    },
    /// The highlighted option was committed as the user's selection.
    OptionCommitted {
        /// Committed option
        label: Label,
    },
    /// A held commitment was released.
    CommitCleared {
        /// Option that was committed until now
        label: Label,
    },
}

impl InputEvent {
    /// Short event name for log lines.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ButtonPress { .. } => "button-press",
            Self::ButtonRelease { .. } => "button-release",
            Self::EncoderStep { .. } => "encoder-step",
            Self::OptionChanged { .. } => "option-changed",
            Self::OptionCommitted { .. } => "option-committed",
            Self::CommitCleared { .. } => "commit-cleared",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fits() {
        let l = label("Option A").unwrap();
        assert_eq!(l.as_str(), "Option A");
    }

    #[test]
    fn test_label_too_long() {
        let long = "x".repeat(LABEL_CAPACITY + 1);
        assert!(label(&long).is_none());
        assert!(label(&long[..LABEL_CAPACITY]).is_some());
    }

    #[test]
    fn test_event_kind_names() {
        let ev = InputEvent::EncoderStep { delta: 1 };
        assert_eq!(ev.kind(), "encoder-step");
        let ev = InputEvent::ButtonPress {
            id: ButtonId(1),
            ordinal: 2,
        };
        assert_eq!(ev.kind(), "button-press");
    }
}
