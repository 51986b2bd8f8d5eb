use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_OBSERVER_ID: AtomicUsize = AtomicUsize::new(0);
static NEXT_SUBJECT_ID: AtomicUsize = AtomicUsize::new(0);

macro_rules! process_unique_id {
    ($(#[$meta:meta])* $name:ident, $counter:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            /// Allocate the next identifier from the process-wide counter
            pub fn allocate() -> Self { Self($counter.fetch_add(1, Ordering::Relaxed)) }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize { id.0 }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, concat!($prefix, "_{}"), self.0) }
        }
    };
}

process_unique_id!(
    /// Identity of an observer. Subjects compare observers by this and nothing else,
    /// so two observers with identical state are still distinct subscribers.
    ObserverId,
    NEXT_OBSERVER_ID,
    "observer"
);

process_unique_id!(
    /// Identity of a subject, used for diagnostics.
    SubjectId,
    NEXT_SUBJECT_ID,
    "subject"
);
