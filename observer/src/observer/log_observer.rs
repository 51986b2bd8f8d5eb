use tracing::info;

use super::Observer;
use crate::{ObserverId, Subject, UpdateError};

/// Reports every update it receives as an `INFO` event
#[derive(Debug)]
pub struct LogObserver {
    id: ObserverId,
}

impl Default for LogObserver {
    fn default() -> Self { Self::new() }
}

impl LogObserver {
    pub fn new() -> Self { Self { id: ObserverId::allocate() } }

    pub fn id(&self) -> ObserverId { self.id }
}

impl<T: std::fmt::Debug> Observer<T> for LogObserver {
    fn update(&self, subject: &Subject<T>) -> Result<(), UpdateError> {
        subject.with_data(|data| {
            info!(observer = %self.id, subject = %subject.id(), "{} notified that {} has changed to {:?}", self.id, subject.id(), data)
        });
        Ok(())
    }

    fn id(&self) -> ObserverId { self.id }
}
