//! Input event bus.
//!
//! Every source publishes into one bounded FIFO; the UI drains it once per
//! frame or awaits it through a [`BusReader`].
//!
//! # Overflow handling
//!
//! [`EventBus::publish`] never blocks. If the consumer stalls and the queue
//! reaches capacity, the incoming event is dropped, counted in
//! [`EventBus::dropped`], and a warning is logged. Events already queued are
//! never displaced, so the consumer always sees the oldest events in order.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use heapless::Vec;
use platform::{InputDevice, InputEvent};

// ---------------------------------------------------------------------------
// EventBus: producer side and polling consumer
// ---------------------------------------------------------------------------

/// Bounded multi-producer, single-consumer event queue of depth `N`.
pub struct EventBus<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, InputEvent, N>,
    dropped: AtomicU32,
}

impl<const N: usize> EventBus<N> {
    /// Empty bus. `const`, so it can back a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue `event` without blocking.
    ///
    /// Returns `true` if the event was enqueued, `false` if the bus was full
    /// and the event was dropped.
    pub fn publish(&self, event: InputEvent) -> bool {
        match self.channel.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
                warn!("input bus full, event dropped ({} dropped so far)", total);
                false
            }
        }
    }

    /// Take every queued event, oldest first.
    ///
    /// Events published while draining may land in this batch or the next one,
    /// never both.
    pub fn drain(&self) -> Vec<InputEvent, N> {
        let mut out = Vec::new();
        while !out.is_full() {
            let Ok(event) = self.channel.try_receive() else {
                break;
            };
            // Cannot fail: capacity checked above.
            out.push(event).ok();
        }
        out
    }

    /// Number of events dropped because the bus was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Subscribing consumer. Use one reader at a time; concurrent readers
    /// split the stream between them.
    pub fn reader(&self) -> BusReader<'_, N> {
        BusReader {
            rx: self.channel.receiver(),
        }
    }
}

impl<const N: usize> Default for EventBus<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// BusReader: async consumer
// ---------------------------------------------------------------------------

/// Receiving end of an [`EventBus`]; implements [`platform::InputDevice`].
pub struct BusReader<'a, const N: usize> {
    rx: Receiver<'a, CriticalSectionRawMutex, InputEvent, N>,
}

impl<const N: usize> InputDevice for BusReader<'_, N> {
    async fn wait_for_event(&mut self) -> InputEvent {
        self.rx.receive().await
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.rx.try_receive().ok() // ok: TryReceiveError::Empty is exactly "no event"
    }
}
