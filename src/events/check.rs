//! Check-result payloads delivered by the host engine.
//!
//! The engine emits a stream of check lifecycle notifications; only the
//! `Processed` phase carries a finished result worth feeding to
//! subscribers. State codes are the engine's raw integers and are rendered
//! as numbers on the wire, so no state enum is imposed here.

use super::EventKind;

/// Where in its lifecycle a check notification sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    /// The check was scheduled or handed to a worker; no result yet.
    Initiated,
    /// The check result came back and was processed by the engine.
    Processed,
}

/// One host check notification.
#[derive(Debug, Clone)]
pub struct HostCheckData {
    /// Lifecycle phase of this notification.
    pub phase: CheckPhase,
    /// Host name.
    pub name: String,
    /// State code before this result.
    pub last_state: i32,
    /// State code after this result.
    pub current_state: i32,
    /// Plugin output.
    pub output: String,
}

/// One service check notification.
#[derive(Debug, Clone)]
pub struct ServiceCheckData {
    /// Lifecycle phase of this notification.
    pub phase: CheckPhase,
    /// Name of the host the service runs on.
    pub host_name: String,
    /// Service description.
    pub description: String,
    /// State code before this result.
    pub last_state: i32,
    /// State code after this result.
    pub current_state: i32,
    /// Plugin output.
    pub output: String,
}

/// A monitoring-engine event as handed across the broker seam.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Host check lifecycle notification.
    HostCheck(HostCheckData),
    /// Service check lifecycle notification.
    ServiceCheck(ServiceCheckData),
}

impl EngineEvent {
    /// Returns the registration kind this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::HostCheck(_) => EventKind::HostCheck,
            EngineEvent::ServiceCheck(_) => EventKind::ServiceCheck,
        }
    }
}
