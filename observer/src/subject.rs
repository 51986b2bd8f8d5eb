use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::thread::ThreadId;

use tracing::{debug, warn};

use crate::{
    subscription::{SubscriberSet, Subscribed, Unsubscribed},
    DispatchPolicy, NotifyError, Observer, ObserverId, SubjectId, UpdateError,
};

/// Holds a value and the observers that want to hear about it.
///
/// Changing the value and telling observers about it are separate steps:
/// [`set_data`](Self::set_data) never notifies, so several changes can be batched
/// before a single [`notify`](Self::notify).
pub struct Subject<T> {
    id: SubjectId,
    policy: DispatchPolicy,
    data: RwLock<Arc<T>>,
    subscribers: RwLock<SubscriberSet<T>>,
    // Value pinned by each thread that is currently broadcasting
    views: Mutex<HashMap<ThreadId, BroadcastView<T>>>,
}

struct BroadcastView<T> {
    data: Arc<T>,
    depth: usize,
}

/// Pins the value for the dispatching thread until dropped
struct Broadcasting<'a, T> {
    subject: &'a Subject<T>,
    thread: ThreadId,
}

impl<T> Drop for Broadcasting<'_, T> {
    fn drop(&mut self) {
        let mut views = self.subject.views.lock().expect("views lock is poisoned");
        if let Some(view) = views.get_mut(&self.thread) {
            view.depth -= 1;
            if view.depth == 0 {
                views.remove(&self.thread);
            }
        }
    }
}

/// What happened during a completed broadcast
#[derive(Debug, Default)]
pub struct NotifyReport {
    /// Observers whose update succeeded
    pub delivered: usize,
    /// Observers whose update failed and were skipped (only under [`DispatchPolicy::Isolate`])
    pub failed: Vec<(ObserverId, UpdateError)>,
}

impl NotifyReport {
    pub fn is_clean(&self) -> bool { self.failed.is_empty() }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject").field("id", &self.id).field("policy", &self.policy).field("subscribers", &self.len()).finish()
    }
}

impl<T: Default> Default for Subject<T> {
    fn default() -> Self { Self::new(T::default()) }
}

impl<T> Subject<T> {
    /// Create a subject with the default [`DispatchPolicy`]
    pub fn new(data: T) -> Self { Self::with_policy(data, DispatchPolicy::default()) }

    pub fn with_policy(data: T, policy: DispatchPolicy) -> Self {
        Self {
            id: SubjectId::allocate(),
            policy,
            data: RwLock::new(Arc::new(data)),
            subscribers: RwLock::new(SubscriberSet::new()),
            views: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> SubjectId { self.id }

    pub fn policy(&self) -> DispatchPolicy { self.policy }

    /// Add an observer to the end of the notification order, unless it is already subscribed
    pub fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> Subscribed {
        let observer_id = observer.id();
        let outcome = self.subscribers.write().expect("subscribers lock is poisoned").insert(observer);
        match outcome {
            Subscribed::Added => debug!(subject = %self.id, observer = %observer_id, "subscribed"),
            Subscribed::AlreadyPresent => debug!(subject = %self.id, observer = %observer_id, "already subscribed"),
        }
        outcome
    }

    pub fn unsubscribe(&self, observer: &dyn Observer<T>) -> Unsubscribed { self.unsubscribe_id(observer.id()) }

    pub fn unsubscribe_id(&self, observer_id: ObserverId) -> Unsubscribed {
        let outcome = self.subscribers.write().expect("subscribers lock is poisoned").remove(observer_id);
        match outcome {
            Unsubscribed::Removed => debug!(subject = %self.id, observer = %observer_id, "unsubscribed"),
            Unsubscribed::NotPresent => debug!(subject = %self.id, observer = %observer_id, "not subscribed"),
        }
        outcome
    }

    pub fn is_subscribed(&self, observer_id: ObserverId) -> bool {
        self.subscribers.read().expect("subscribers lock is poisoned").contains(observer_id)
    }

    /// Subscriber ids in notification order
    pub fn subscriber_ids(&self) -> Vec<ObserverId> { self.subscribers.read().expect("subscribers lock is poisoned").ids() }

    pub fn len(&self) -> usize { self.subscribers.read().expect("subscribers lock is poisoned").len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Replace the current value. Does not notify.
    ///
    /// Called from inside a broadcast, the new value is also what the remaining
    /// observers of that broadcast read. Called from any other thread, it only
    /// becomes visible once that broadcast is over.
    pub fn set_data(&self, data: T) {
        let data = Arc::new(data);
        {
            let mut views = self.views.lock().expect("views lock is poisoned");
            if let Some(view) = views.get_mut(&std::thread::current().id()) {
                view.data = data.clone();
            }
        }
        *self.data.write().expect("data lock is poisoned") = data;
        debug!(subject = %self.id, "data replaced");
    }

    /// Calls a closure with a borrow of the current value.
    ///
    /// No lock is held while the closure runs, so it may read or replace the value
    /// of this subject; a replacement is not seen through the borrow it was handed.
    pub fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let data = self.current();
        f(&data)
    }

    /// The value this thread should see: its broadcast view if it is dispatching, the stored value otherwise
    fn current(&self) -> Arc<T> {
        if let Some(view) = self.views.lock().expect("views lock is poisoned").get(&std::thread::current().id()) {
            return view.data.clone();
        }
        self.data.read().expect("data lock is poisoned").clone()
    }

    fn begin_broadcast(&self) -> Broadcasting<'_, T> {
        let thread = std::thread::current().id();
        let mut views = self.views.lock().expect("views lock is poisoned");
        match views.get_mut(&thread) {
            // nested notify on the same thread keeps the outer view
            Some(view) => view.depth += 1,
            None => {
                let data = self.data.read().expect("data lock is poisoned").clone();
                views.insert(thread, BroadcastView { data, depth: 1 });
            }
        }
        Broadcasting { subject: self, thread }
    }

    /// Broadcast to every current subscriber, in subscription order.
    ///
    /// Observers receive this subject and read the value through it. The subscriber
    /// list is snapshotted first, so observers may subscribe, unsubscribe or set data
    /// from inside `update`; subscription changes apply to the next broadcast.
    ///
    /// The value is pinned when the broadcast starts: every observer reads that value
    /// (or one written from inside the broadcast), never a value written concurrently
    /// by another thread.
    pub fn notify(&self) -> Result<NotifyReport, NotifyError> {
        let _broadcasting = self.begin_broadcast();
        let subscribers = self.subscribers.read().expect("subscribers lock is poisoned").snapshot();
        debug!(subject = %self.id, subscribers = subscribers.len(), "broadcast");

        let mut report = NotifyReport::default();
        for observer in subscribers {
            let observer_id = observer.id();
            match observer.update(self) {
                Ok(()) => report.delivered += 1,
                Err(source) => match self.policy {
                    DispatchPolicy::FailFast => {
                        return Err(NotifyError { subject: self.id, observer: observer_id, delivered: report.delivered, source });
                    }
                    DispatchPolicy::Isolate => {
                        warn!(subject = %self.id, observer = %observer_id, error = %source, "observer update failed, skipping");
                        report.failed.push((observer_id, source));
                    }
                },
            }
        }
        Ok(report)
    }
}

impl<T: Clone> Subject<T> {
    /// Returns a clone of the current value
    pub fn get_data(&self) -> T { T::clone(&self.current()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CallbackObserver;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Arc<CallbackObserver<String>> {
        let log = log.clone();
        Arc::new(CallbackObserver::new(move |subject: &Subject<String>| {
            log.lock().unwrap().push(format!("{name}:{}", subject.get_data()));
        }))
    }

    #[test]
    fn set_data_overwrites_without_notifying() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new("a".to_string());
        subject.subscribe(recorder(&log, "o1"));

        subject.set_data("b".to_string());
        subject.set_data("c".to_string());

        assert_eq!(subject.get_data(), "c");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn notify_on_empty_subject_is_a_noop() {
        let subject = Subject::new(1u32);
        let report = subject.notify().unwrap();
        assert_eq!(report.delivered, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn notify_sees_value_at_broadcast_time() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new("before".to_string());
        subject.subscribe(recorder(&log, "o1"));
        subject.set_data("after".to_string());

        subject.notify().unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["o1:after"]);
    }

    #[test]
    fn duplicate_subscribe_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new(String::new());
        let o1 = recorder(&log, "o1");

        assert_eq!(subject.subscribe(o1.clone()), Subscribed::Added);
        assert_eq!(subject.subscribe(o1.clone()), Subscribed::AlreadyPresent);
        assert_eq!(subject.len(), 1);

        subject.notify().unwrap();
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribe_absent_is_safe() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new(String::new());
        let o1 = recorder(&log, "o1");

        assert_eq!(subject.unsubscribe(&*o1), Unsubscribed::NotPresent);
        assert!(subject.is_empty());
    }

    #[test]
    fn debug_shows_subscriber_count() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new(String::new());
        subject.subscribe(recorder(&log, "o1"));
        let debug = format!("{subject:?}");
        assert!(debug.contains("subscribers: 1"), "{debug}");
    }

    #[test]
    fn with_data_allows_nested_access() {
        let subject = Subject::new(1u32);
        let seen = subject.with_data(|outer| {
            subject.set_data(outer + 1);
            (*outer, subject.get_data(), subject.with_data(|inner| *inner))
        });
        assert_eq!(seen, (1, 2, 2));
        assert_eq!(subject.get_data(), 2);
    }

    #[test]
    fn broadcast_view_is_released_after_notify() {
        let subject = Subject::new(0u32);
        subject.subscribe(Arc::new(CallbackObserver::new(|_: &Subject<u32>| {})));
        subject.notify().unwrap();
        assert!(subject.views.lock().unwrap().is_empty());
    }
}
