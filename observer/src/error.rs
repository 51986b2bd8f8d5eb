use thiserror::Error;

use crate::{ObserverId, SubjectId};

/// Why an observer could not handle an update
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("update rejected: {0}")]
    Rejected(String),

    #[error("observer disconnected")]
    Disconnected,

    #[error("update failed: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl UpdateError {
    pub fn rejected(reason: impl Into<String>) -> Self { UpdateError::Rejected(reason.into()) }

    pub fn other<E>(err: E) -> Self
    where E: Into<Box<dyn std::error::Error + Send + Sync + 'static>> {
        UpdateError::Other(err.into())
    }
}

/// A broadcast that was cut short by a failing observer.
///
/// Only produced under [`DispatchPolicy::FailFast`](crate::DispatchPolicy::FailFast).
/// Observers subscribed after `observer` were not invoked.
#[derive(Debug, Error)]
#[error("{observer} failed to update from {subject} after {delivered} deliveries: {source}")]
pub struct NotifyError {
    pub subject: SubjectId,
    pub observer: ObserverId,
    /// Number of observers that were updated successfully before the failure
    pub delivered: usize,
    pub source: UpdateError,
}
