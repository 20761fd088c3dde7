//! Host event categories a channel can tap.

/// Classification of host-engine events.
///
/// A channel declares the kinds it wants; the activation controller
/// registers each declared kind with the broker while the channel has
/// subscribers, and deregisters them all when the last subscriber leaves.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A host check completed and its result was processed.
    HostCheck,
    /// A service check completed and its result was processed.
    ServiceCheck,
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::HostCheck => "host_check",
            EventKind::ServiceCheck => "service_check",
        }
    }
}
