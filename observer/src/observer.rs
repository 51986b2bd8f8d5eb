use crate::{ObserverId, Subject, UpdateError};

mod callback_observer;
mod channel_observer;
mod log_observer;

pub use callback_observer::*;
pub use channel_observer::*;
pub use log_observer::*;

/// Something that reacts when a [`Subject`] it is subscribed to broadcasts
pub trait Observer<T>: Send + Sync {
    /// Called once per broadcast with the broadcasting subject, which can be read
    /// for its current value. Returning an error hands the failure to the subject's
    /// [`DispatchPolicy`](crate::DispatchPolicy).
    fn update(&self, subject: &Subject<T>) -> Result<(), UpdateError>;

    /// Identity used by subjects for membership checks
    fn id(&self) -> ObserverId;
}
