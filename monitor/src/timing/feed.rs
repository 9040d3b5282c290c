//! Timing feeds.
//!
//! A [`TimingFeed`] is the host capability the observer subscribes to.
//! Hosts without the capability hand out no subscription at all.

use super::ResourceTimingEntry;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Entries delivered together in one callback.
pub type TimingBatch = Vec<ResourceTimingEntry>;

/// Number of entries a [`BufferedTimingFeed`] keeps for late subscribers.
pub const DEFAULT_BUFFER_SIZE: usize = 250;

/// Source of resource timing batches.
pub trait TimingFeed: Send + Sync {
    /// Subscribes to future batches.
    ///
    /// With `buffered` set, entries recorded before the call are delivered
    /// first as a single batch. Returns `None` when the host has no timing
    /// capability.
    fn subscribe(&self, buffered: bool) -> Option<UnboundedReceiver<TimingBatch>>;
}

/// Feed for hosts that do not expose timing data.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableFeed;

impl TimingFeed for UnavailableFeed {
    fn subscribe(&self, _buffered: bool) -> Option<UnboundedReceiver<TimingBatch>> {
        None
    }
}

#[derive(Debug, Default)]
struct FeedState {
    buffer: Vec<ResourceTimingEntry>,
    subscribers: Vec<UnboundedSender<TimingBatch>>,
}

/// In-process feed the host pushes batches into.
///
/// Keeps up to `capacity` entries for buffered subscribers. Once the
/// buffer is full, further entries are still delivered live but no
/// longer buffered.
#[derive(Debug)]
pub struct BufferedTimingFeed {
    state: Mutex<FeedState>,
    capacity: usize,
}

impl BufferedTimingFeed {
    /// Creates a feed with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Creates a feed that buffers at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(FeedState::default()),
            capacity,
        }
    }

    /// Publishes a batch to every live subscriber.
    pub fn push(&self, batch: TimingBatch) {
        if batch.is_empty() {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let room = self.capacity.saturating_sub(state.buffer.len());
        if room < batch.len() {
            tracing::debug!(
                capacity = self.capacity,
                dropped = batch.len() - room,
                "Timing buffer full, entries delivered live only"
            );
        }
        state.buffer.extend(batch.iter().take(room).cloned());

        state
            .subscribers
            .retain(|subscriber| subscriber.send(batch.clone()).is_ok());
    }

    /// Number of entries currently buffered.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .buffer
            .len()
    }

    /// Number of subscribers still listening.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.subscribers.retain(|subscriber| !subscriber.is_closed());
        state.subscribers.len()
    }
}

impl Default for BufferedTimingFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingFeed for BufferedTimingFeed {
    fn subscribe(&self, buffered: bool) -> Option<UnboundedReceiver<TimingBatch>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if buffered && !state.buffer.is_empty() {
            // The receiver is alive here, so this cannot fail.
            let _ = tx.send(state.buffer.clone());
        }

        state.subscribers.push(tx);
        Some(rx)
    }
}
