//! UI side of the bus: drain once per frame, fold into the menu, log.

use std::time::Duration;

use input::{InputCore, InputEvent};
use platform::config::UI_FRAME_HZ;
use platform::Instant;
use tokio::time::{interval, MissedTickBehavior};
use ui::{MenuScreen, PressAction};

use crate::clock::Clock;

/// Frame-driven consumer of the input event stream.
pub struct Consumer {
    menu: MenuScreen,
    history: Option<Vec<InputEvent>>,
    dropped_seen: u32,
}

impl Consumer {
    /// Consumer updating `menu`.
    pub fn new(menu: MenuScreen) -> Self {
        Self {
            menu,
            history: None,
            dropped_seen: 0,
        }
    }

    /// Also keep every consumed event (for replays and tests).
    #[must_use]
    pub fn recording(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    /// Drain the bus once and apply every event at `now`. Returns the number
    /// of events consumed.
    pub fn frame(&mut self, core: &InputCore, now: Instant) -> usize {
        let events = core.drain();
        for event in &events {
            log_event(event);
            let before = self.menu.screen();
            self.menu.apply(event, now);
            let after = self.menu.screen();
            if after != before {
                let action = self.menu.last_action().map_or("none", PressAction::as_str);
                tracing::info!(screen = after.as_str(), action, "screen changed");
            }
        }

        let dropped = core.dropped();
        if dropped != self.dropped_seen {
            tracing::warn!(
                lost = dropped.wrapping_sub(self.dropped_seen),
                total = dropped,
                "input events lost, UI is falling behind"
            );
            self.dropped_seen = dropped;
        }

        let consumed = events.len();
        if let Some(history) = self.history.as_mut() {
            history.extend(events);
        }
        consumed
    }

    /// Run frames at [`UI_FRAME_HZ`] until cancelled.
    pub async fn run(&mut self, core: &InputCore, clock: Clock) {
        let period = Duration::from_secs(1)
            .checked_div(UI_FRAME_HZ)
            .unwrap_or(Duration::from_millis(16));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.frame(core, clock.now());
        }
    }

    /// Menu state.
    pub fn menu(&self) -> &MenuScreen {
        &self.menu
    }

    /// Consumed events, when recording.
    pub fn history(&self) -> &[InputEvent] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Give up the recorded events.
    pub fn into_history(self) -> Vec<InputEvent> {
        self.history.unwrap_or_default()
    }
}

fn log_event(event: &InputEvent) {
    match event {
        InputEvent::ButtonPress { id, ordinal } => {
            tracing::info!(button = id.0, ordinal, "button press");
        }
        InputEvent::ButtonRelease { id } => tracing::debug!(button = id.0, "button release"),
        InputEvent::EncoderStep { delta } => tracing::debug!(delta, "encoder step"),
        InputEvent::OptionChanged { label } => {
            tracing::info!(option = label.as_str(), "option highlighted");
        }
        InputEvent::OptionCommitted { label } => {
            tracing::info!(option = label.as_str(), "option committed");
        }
        InputEvent::CommitCleared { label } => {
            tracing::info!(option = label.as_str(), "commitment cleared");
        }
    }
}
