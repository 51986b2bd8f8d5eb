use super::Observer;
use crate::{ObserverId, Subject, UpdateError};

type Callback<T> = Box<dyn Fn(&Subject<T>) -> Result<(), UpdateError> + Send + Sync>;

/// An observer that wraps a callback which is called whenever a subject it is
/// subscribed to broadcasts.
pub struct CallbackObserver<T> {
    id: ObserverId,
    callback: Callback<T>,
}

impl<T> CallbackObserver<T> {
    /// Create an observer from a callback that cannot fail
    pub fn new<F>(callback: F) -> Self
    where F: Fn(&Subject<T>) + Send + Sync + 'static {
        Self::fallible(move |subject: &Subject<T>| {
            callback(subject);
            Ok(())
        })
    }

    /// Create an observer whose callback may reject an update
    pub fn fallible<F>(callback: F) -> Self
    where F: Fn(&Subject<T>) -> Result<(), UpdateError> + Send + Sync + 'static {
        Self { id: ObserverId::allocate(), callback: Box::new(callback) }
    }

    pub fn id(&self) -> ObserverId { self.id }
}

impl<T> Observer<T> for CallbackObserver<T> {
    fn update(&self, subject: &Subject<T>) -> Result<(), UpdateError> { (self.callback)(subject) }

    fn id(&self) -> ObserverId { self.id }
}

impl<T> std::fmt::Debug for CallbackObserver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("CallbackObserver").field("id", &self.id).finish() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn callbacks_get_distinct_ids() {
        let a = CallbackObserver::new(|_: &Subject<()>| {});
        let b = CallbackObserver::new(|_: &Subject<()>| {});
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn fallible_callback_error_is_returned() {
        let observer = CallbackObserver::fallible(|_: &Subject<()>| Err(UpdateError::rejected("busy")));
        let subject = Subject::new(());
        assert!(matches!(Observer::update(&observer, &subject), Err(UpdateError::Rejected(reason)) if reason == "busy"));
    }

    #[test]
    fn callback_runs_per_update() {
        let calls = Arc::new(AtomicUsize::new(0));
        let observer = {
            let calls = calls.clone();
            CallbackObserver::new(move |_: &Subject<()>| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        let subject = Subject::new(());
        observer.update(&subject).unwrap();
        observer.update(&subject).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
