/// How a broadcast reacts when an observer's update fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Stop at the first failing observer and report it to the caller of `notify`
    #[default]
    FailFast,
    /// Log the failure, skip the observer and keep going
    Isolate,
}
