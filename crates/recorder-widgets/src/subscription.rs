//! Subscription helper for bridging crossbeam channels to iced subscriptions
//!
//! Playback engines and the waveform loader report back over crossbeam
//! channels. This module turns such a receiver into an iced `Subscription`.
//!
//! # Usage
//!
//! ```ignore
//! use recorder_widgets::channel_subscription;
//!
//! fn subscription(&self) -> Subscription<Message> {
//!     Subscription::batch([
//!         channel_subscription(PLAYBACK_EVENTS_ID, self.events.clone())
//!             .map(Message::Playback),
//!         // ... other subscriptions
//!     ])
//! }
//! ```

use std::any::TypeId;
use std::hash::Hash;
use std::time::Duration;

use crossbeam::channel::{Receiver, TryRecvError};
use iced::advanced::subscription::{self, EventStream, Hasher, Recipe};
use iced::futures::stream::BoxStream;
use iced::Subscription;

/// Polling interval while the channel is empty
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Recipe for polling a crossbeam receiver as an iced subscription
struct ChannelRecipe<T> {
    /// Caller-chosen identity, so the same channel keeps one stream alive
    id: u64,
    receiver: Receiver<T>,
}

impl<T: Send + 'static> Recipe for ChannelRecipe<T> {
    type Output = T;

    fn hash(&self, state: &mut Hasher) {
        TypeId::of::<Self>().hash(state);
        self.id.hash(state);
    }

    fn stream(self: Box<Self>, _input: EventStream) -> BoxStream<'static, Self::Output> {
        Box::pin(iced::futures::stream::unfold(
            self.receiver,
            |rx| async move {
                loop {
                    match rx.try_recv() {
                        Ok(item) => return Some((item, rx)),
                        // Sender dropped: end the stream
                        Err(TryRecvError::Disconnected) => {
                            log::debug!("channel subscription closed");
                            return None;
                        }
                        Err(TryRecvError::Empty) => tokio::time::sleep(POLL_INTERVAL).await,
                    }
                }
            },
        ))
    }
}

/// Create an iced subscription from a crossbeam receiver.
///
/// Items are yielded in the order they were sent. The stream ends when all
/// senders are dropped. Use `.map()` to convert to your message type.
///
/// `id` must be stable across calls for the same channel; iced uses it to
/// decide whether the running stream can be kept.
pub fn channel_subscription<T>(id: u64, receiver: Receiver<T>) -> Subscription<T>
where
    T: Send + 'static,
{
    subscription::from_recipe(ChannelRecipe { id, receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_compile() {
        fn _check<T>(_: Subscription<T>) {}
        let (_tx, rx) = crossbeam::channel::unbounded::<u64>();
        _check(channel_subscription(1, rx));
    }
}
