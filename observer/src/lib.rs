/*!
Synchronous subject/observer notification for ankurah

A [`Subject`] holds a value and an ordered set of [`Observer`]s. Changing the value and
telling observers about it are separate steps: [`Subject::set_data`] only stores, and
[`Subject::notify`] broadcasts to every subscriber, in subscription order, before returning.

# Design requirements:
- Observers are compared by [`ObserverId`] only - never by their state
- An observer is subscribed at most once per subject
- Broadcast order is subscription order
- Observers read the value through the subject they are handed, so they always see the value current at broadcast time
- Observers may subscribe/unsubscribe/set data re-entrantly from inside `update`
- What a failing observer does to the rest of the broadcast is the subject's [`DispatchPolicy`]

# Basic usage

```rust
use ankurah_observer::*;
use std::sync::Arc;

let subject = Subject::new("initial".to_string());
let first = Arc::new(CallbackObserver::new(|subject: &Subject<String>| println!("first saw {}", subject.get_data())));
let second = Arc::new(LogObserver::new());

assert_eq!(subject.subscribe(first.clone()), Subscribed::Added);
assert_eq!(subject.subscribe(second.clone()), Subscribed::Added);
assert_eq!(subject.subscribe(first.clone()), Subscribed::AlreadyPresent);

subject.set_data("x".to_string());
let report = subject.notify().unwrap();
assert_eq!(report.delivered, 2);

assert_eq!(subject.unsubscribe(&*first), Unsubscribed::Removed);
assert_eq!(subject.unsubscribe(&*first), Unsubscribed::NotPresent);
```

# Failing observers

```rust
use ankurah_observer::*;
use std::sync::Arc;

let subject = Subject::with_policy(0u32, DispatchPolicy::Isolate);
subject.subscribe(Arc::new(CallbackObserver::fallible(|_: &Subject<u32>| Err(UpdateError::rejected("not today")))));
subject.subscribe(Arc::new(CallbackObserver::new(|subject: &Subject<u32>| assert_eq!(subject.get_data(), 0))));

let report = subject.notify().unwrap();
assert_eq!(report.delivered, 1);
assert_eq!(report.failed.len(), 1);
```
*/

mod error;
mod id;
mod observer;
mod policy;
mod subject;
mod subscription;

pub use error::*;
pub use id::*;
pub use observer::*;
pub use policy::*;
pub use subject::*;
pub use subscription::{Subscribed, Unsubscribed};
