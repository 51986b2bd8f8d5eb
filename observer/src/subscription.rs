use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::{Observer, ObserverId};

/// Outcome of [`Subject::subscribe`](crate::Subject::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscribed {
    Added,
    /// The observer was already subscribed; nothing changed
    AlreadyPresent,
}

/// Outcome of [`Subject::unsubscribe`](crate::Subject::unsubscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsubscribed {
    Removed,
    /// The observer was not subscribed; nothing changed
    NotPresent,
}

/// Position of a subscriber in notification order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot(u64);

/// Ordered set of observers, unique by [`ObserverId`].
///
/// `entries` keeps insertion order, `index` answers membership without a scan.
pub(crate) struct SubscriberSet<T> {
    entries: BTreeMap<Slot, Arc<dyn Observer<T>>>,
    index: HashMap<ObserverId, Slot>,
    next_slot: u64,
}

impl<T> Default for SubscriberSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T> SubscriberSet<T> {
    pub fn new() -> Self { Self { entries: BTreeMap::new(), index: HashMap::new(), next_slot: 0 } }

    pub fn insert(&mut self, observer: Arc<dyn Observer<T>>) -> Subscribed {
        let id = observer.id();
        if self.index.contains_key(&id) {
            return Subscribed::AlreadyPresent;
        }
        let slot = Slot(self.next_slot);
        self.next_slot += 1;
        self.index.insert(id, slot);
        self.entries.insert(slot, observer);
        Subscribed::Added
    }

    pub fn remove(&mut self, id: ObserverId) -> Unsubscribed {
        match self.index.remove(&id) {
            Some(slot) => {
                self.entries.remove(&slot);
                Unsubscribed::Removed
            }
            None => Unsubscribed::NotPresent,
        }
    }

    pub fn contains(&self, id: ObserverId) -> bool { self.index.contains_key(&id) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn ids(&self) -> Vec<ObserverId> { self.entries.values().map(|observer| observer.id()).collect() }

    /// Clone the current subscribers in notification order
    pub fn snapshot(&self) -> Vec<Arc<dyn Observer<T>>> { self.entries.values().cloned().collect() }
}
