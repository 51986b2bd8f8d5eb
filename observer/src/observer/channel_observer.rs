use super::Observer;
use crate::{ObserverId, Subject, UpdateError};

/// Type alias for the sending half a [`ChannelObserver`] forwards into
pub type ChannelSender<T> = Box<dyn Fn(T) -> Result<(), UpdateError> + Send + Sync + 'static>;

/// Trait for channel senders that a [`ChannelObserver`] can forward values into
pub trait IntoChannelSender<T> {
    fn into_channel_sender(self) -> ChannelSender<T>;
}

/// Forwards a clone of the subject's value into a channel on every broadcast.
/// A dropped receiver surfaces as [`UpdateError::Disconnected`].
pub struct ChannelObserver<T> {
    id: ObserverId,
    sender: ChannelSender<T>,
}

impl<T> ChannelObserver<T> {
    pub fn new<S: IntoChannelSender<T>>(sender: S) -> Self { Self { id: ObserverId::allocate(), sender: sender.into_channel_sender() } }

    pub fn id(&self) -> ObserverId { self.id }
}

impl<T: Clone> Observer<T> for ChannelObserver<T> {
    fn update(&self, subject: &Subject<T>) -> Result<(), UpdateError> { (self.sender)(subject.get_data()) }

    fn id(&self) -> ObserverId { self.id }
}

impl<T: Send + 'static> IntoChannelSender<T> for std::sync::mpsc::Sender<T> {
    fn into_channel_sender(self) -> ChannelSender<T> { Box::new(move |value| self.send(value).map_err(|_| UpdateError::Disconnected)) }
}

#[cfg(feature = "tokio")]
impl<T: Send + 'static> IntoChannelSender<T> for tokio::sync::mpsc::UnboundedSender<T> {
    fn into_channel_sender(self) -> ChannelSender<T> { Box::new(move |value| self.send(value).map_err(|_| UpdateError::Disconnected)) }
}
