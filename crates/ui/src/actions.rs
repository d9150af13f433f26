//! What a multi-press ordinal asks the UI to do.

/// Action selected by the position of a press within its burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressAction {
    /// Single press: act on the highlighted option.
    Select,
    /// Double press: show the time.
    ShowTime,
    /// Triple press: show the date.
    ShowDate,
    /// The burst overflowed.
    Cancelled,
}

impl PressAction {
    /// Map a burst ordinal. Ordinals past 3 only occur with a raised
    /// `max_ordinal` and fall back to [`PressAction::Select`].
    pub const fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => Self::Cancelled,
            2 => Self::ShowTime,
            3 => Self::ShowDate,
            _ => Self::Select,
        }
    }

    /// Short name for status lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::ShowTime => "show time",
            Self::ShowDate => "show date",
            Self::Cancelled => "cancelled",
        }
    }
}
