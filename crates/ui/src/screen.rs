//! Screen identifier enum: the menu and the overlays shown on top of it.

/// Every view the navigator can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Option list with the highlighted entry.
    Menu,
    /// Current time, shown over the menu.
    TimeOverlay,
    /// Current date, shown over the menu.
    DateOverlay,
}

impl Screen {
    /// `true` for screens drawn on top of the menu.
    pub const fn is_overlay(self) -> bool {
        !matches!(self, Self::Menu)
    }

    /// Short name for status lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::TimeOverlay => "time",
            Self::DateOverlay => "date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;

    #[test]
    fn test_menu_is_not_overlay() {
        assert!(!Screen::Menu.is_overlay());
    }

    #[test]
    fn test_time_and_date_are_overlays() {
        assert!(Screen::TimeOverlay.is_overlay());
        assert!(Screen::DateOverlay.is_overlay());
    }
}
