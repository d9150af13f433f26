//! Menu screen state: highlighted and committed option, last action, idle time.
//!
//! Built purely from drained [`InputEvent`]s; rendering reads it once per
//! frame.

use platform::{ButtonId, Duration, InputEvent, Instant, Label};

use crate::actions::PressAction;
use crate::navigation::Navigator;
use crate::screen::Screen;

/// View model of the option menu.
pub struct MenuScreen {
    highlighted: Label,
    committed: Option<Label>,
    action_button: Option<ButtonId>,
    last_action: Option<PressAction>,
    last_input: Option<Instant>,
    nav: Navigator,
}

impl MenuScreen {
    /// Menu highlighting `initial`, with nothing committed.
    pub fn new(initial: Label) -> Self {
        Self {
            highlighted: initial,
            committed: None,
            action_button: None,
            last_action: None,
            last_input: None,
            nav: Navigator::new(),
        }
    }

    /// Treat presses of `id` as multi-press actions ([`PressAction`]).
    #[must_use]
    pub fn with_action_button(mut self, id: ButtonId) -> Self {
        self.action_button = Some(id);
        self
    }

    /// Fold one event observed at `now` into the view.
    pub fn apply(&mut self, event: &InputEvent, now: Instant) {
        self.last_input = Some(now);
        match event {
            InputEvent::OptionChanged { label } => {
                self.highlighted = label.clone();
                self.nav.home();
            }
            InputEvent::OptionCommitted { label } => self.committed = Some(label.clone()),
            InputEvent::CommitCleared { .. } => self.committed = None,
            InputEvent::ButtonPress { id, ordinal } if Some(*id) == self.action_button => {
                let action = PressAction::from_ordinal(*ordinal);
                match action {
                    PressAction::ShowTime => self.nav.show(Screen::TimeOverlay),
                    PressAction::ShowDate => self.nav.show(Screen::DateOverlay),
                    PressAction::Select | PressAction::Cancelled => self.nav.home(),
                }
                self.last_action = Some(action);
            }
            InputEvent::ButtonPress { .. }
            | InputEvent::ButtonRelease { .. }
            | InputEvent::EncoderStep { .. } => {}
        }
    }

    /// Time since the last event, `None` before the first one.
    pub fn idle_for(&self, now: Instant) -> Option<Duration> {
        let last = self.last_input?;
        Some(
            now.checked_duration_since(last)
                .unwrap_or(Duration::from_ticks(0)),
        )
    }

    /// Highlighted option.
    pub fn highlighted(&self) -> &Label {
        &self.highlighted
    }

    /// Committed option, if any.
    pub fn committed(&self) -> Option<&Label> {
        self.committed.as_ref()
    }

    /// Action of the most recent action-button press.
    pub fn last_action(&self) -> Option<PressAction> {
        self.last_action
    }

    /// Screen to draw.
    pub fn screen(&self) -> Screen {
        self.nav.current()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::label;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn menu() -> MenuScreen {
        MenuScreen::new(label("Option A").unwrap()).with_action_button(ButtonId(1))
    }

    fn press(id: u8, ordinal: u8) -> InputEvent {
        InputEvent::ButtonPress {
            id: ButtonId(id),
            ordinal,
        }
    }

    #[test]
    fn test_tracks_highlight_and_commit() {
        let mut m = menu();
        let b = label("Option B").unwrap();
        m.apply(&InputEvent::OptionChanged { label: b.clone() }, at(0));
        m.apply(&InputEvent::OptionCommitted { label: b.clone() }, at(5));
        assert_eq!(m.highlighted(), &b);
        assert_eq!(m.committed(), Some(&b));

        m.apply(&InputEvent::CommitCleared { label: b }, at(9));
        assert_eq!(m.committed(), None);
    }

    #[test]
    fn test_double_press_shows_time() {
        let mut m = menu();
        m.apply(&press(1, 1), at(0));
        m.apply(&press(1, 2), at(300));
        assert_eq!(m.last_action(), Some(PressAction::ShowTime));
        assert_eq!(m.screen(), Screen::TimeOverlay);

        m.apply(&press(1, 3), at(600));
        assert_eq!(m.screen(), Screen::DateOverlay);

        m.apply(&press(1, 0), at(900));
        assert_eq!(m.last_action(), Some(PressAction::Cancelled));
        assert_eq!(m.screen(), Screen::Menu);
    }

    #[test]
    fn test_other_buttons_are_not_actions() {
        let mut m = menu();
        m.apply(&press(2, 2), at(0));
        assert_eq!(m.last_action(), None);
        assert_eq!(m.screen(), Screen::Menu);
    }

    #[test]
    fn test_scrolling_closes_overlay() {
        let mut m = menu();
        m.apply(&press(1, 2), at(0));
        m.apply(
            &InputEvent::OptionChanged {
                label: label("Option C").unwrap(),
            },
            at(10),
        );
        assert_eq!(m.screen(), Screen::Menu);
    }

    #[test]
    fn test_idle_time() {
        let mut m = menu();
        assert_eq!(m.idle_for(at(100)), None);
        m.apply(&InputEvent::EncoderStep { delta: 1 }, at(100));
        assert_eq!(m.idle_for(at(1100)), Some(Duration::from_millis(1000)));
        // Clock reads before the last input clamp to zero.
        assert_eq!(m.idle_for(at(50)), Some(Duration::from_ticks(0)));
    }
}
