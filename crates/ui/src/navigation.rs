//! Navigation state machine: a bounded stack of [`Screen`]s.
//!
//! The menu is always at the bottom. Overlays stack on top of it; showing an
//! overlay that is already on top is a no-op, and pushing onto a full stack is
//! a silent no-op (bounded buffer, no heap).

use heapless::Vec;

use crate::screen::Screen;

/// Maximum stack depth including the menu.
pub const MAX_DEPTH: usize = 4;

/// Navigation stack rooted at [`Screen::Menu`].
pub struct Navigator {
    stack: Vec<Screen, MAX_DEPTH>,
}

impl Navigator {
    /// Create a navigator showing the menu.
    pub fn new() -> Self {
        let mut stack = Vec::new();
        // Always succeeds: the stack starts empty.
        stack.push(Screen::Menu).ok();
        Navigator { stack }
    }

    /// Screen currently on top.
    #[must_use]
    pub fn current(&self) -> Screen {
        match self.stack.last() {
            Some(s) => *s,
            None => Screen::Menu, // unreachable: back() keeps the root
        }
    }

    /// Show `screen` on top unless it is already there.
    pub fn show(&mut self, screen: Screen) {
        if self.current() == screen {
            return;
        }
        if screen == Screen::Menu {
            self.home();
            return;
        }
        self.stack.push(screen).ok();
    }

    /// Pop the top screen. Does nothing at the menu.
    pub fn back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Drop every overlay.
    pub fn home(&mut self) {
        self.stack.truncate(1);
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigator, MAX_DEPTH};
    use crate::screen::Screen;

    #[test]
    fn test_nav_starts_at_menu() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Menu);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_nav_show_overlay_and_back() {
        let mut nav = Navigator::new();
        nav.show(Screen::TimeOverlay);
        assert_eq!(nav.current(), Screen::TimeOverlay);
        nav.back();
        assert_eq!(nav.current(), Screen::Menu);
    }

    #[test]
    fn test_nav_show_same_overlay_twice_is_noop() {
        let mut nav = Navigator::new();
        nav.show(Screen::DateOverlay);
        nav.show(Screen::DateOverlay);
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_nav_back_at_root_is_noop() {
        let mut nav = Navigator::new();
        nav.back();
        assert_eq!(nav.current(), Screen::Menu);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_nav_home_drops_overlays() {
        let mut nav = Navigator::new();
        nav.show(Screen::TimeOverlay);
        nav.show(Screen::DateOverlay);
        nav.show(Screen::Menu);
        assert_eq!(nav.current(), Screen::Menu);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_nav_stack_max_depth() {
        let mut nav = Navigator::new();
        for _ in 0..MAX_DEPTH * 2 {
            nav.show(Screen::TimeOverlay);
            nav.show(Screen::DateOverlay);
        }
        // Must not panic; depth is capped.
        assert_eq!(nav.depth(), MAX_DEPTH);
    }
}
