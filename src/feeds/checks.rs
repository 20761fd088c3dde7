//! Host and service check feeds.
//!
//! Both feeds render only processed results; a check that was merely
//! initiated carries no outcome worth broadcasting. State transitions are
//! reported as the engine's raw state codes:
//!
//! ```text
//! hostchecks:     "<host> from <last> -> <current>: <plugin output>\n"
//! servicechecks:  "<host>;<service> from <last> -> <current>: <plugin output>\n"
//! ```

use crate::channels::{ChannelDef, ChannelFeed};
use crate::events::{CheckPhase, EngineEvent, EventKind};

/// Feed of processed host check results.
pub struct HostCheckFeed;

impl ChannelFeed for HostCheckFeed {
    fn render(&self, event: &EngineEvent) -> Option<String> {
        let EngineEvent::HostCheck(data) = event else {
            return None;
        };
        if data.phase != CheckPhase::Processed {
            return None;
        }
        Some(format!(
            "{} from {} -> {}: {}\n",
            data.name, data.last_state, data.current_state, data.output
        ))
    }
}

/// Feed of processed service check results.
pub struct ServiceCheckFeed;

impl ChannelFeed for ServiceCheckFeed {
    fn render(&self, event: &EngineEvent) -> Option<String> {
        let EngineEvent::ServiceCheck(data) = event else {
            return None;
        };
        if data.phase != CheckPhase::Processed {
            return None;
        }
        Some(format!(
            "{};{} from {} -> {}: {}\n",
            data.host_name, data.description, data.last_state, data.current_state, data.output
        ))
    }
}

/// The fixed channel set created at startup.
pub fn standard_channels() -> Vec<ChannelDef> {
    vec![
        ChannelDef::new(
            "hostchecks",
            "Host check results",
            vec![EventKind::HostCheck],
            HostCheckFeed,
        ),
        ChannelDef::new(
            "servicechecks",
            "Service check results",
            vec![EventKind::ServiceCheck],
            ServiceCheckFeed,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HostCheckData, ServiceCheckData};

    fn host_event(phase: CheckPhase) -> EngineEvent {
        EngineEvent::HostCheck(HostCheckData {
            phase,
            name: "web01".into(),
            last_state: 0,
            current_state: 1,
            output: "CRITICAL - host unreachable".into(),
        })
    }

    fn service_event(phase: CheckPhase) -> EngineEvent {
        EngineEvent::ServiceCheck(ServiceCheckData {
            phase,
            host_name: "web01".into(),
            description: "http".into(),
            last_state: 0,
            current_state: 2,
            output: "CRITICAL - connection refused".into(),
        })
    }

    #[test]
    fn test_host_feed_line_format() {
        let line = HostCheckFeed.render(&host_event(CheckPhase::Processed)).unwrap();
        assert_eq!(line, "web01 from 0 -> 1: CRITICAL - host unreachable\n");
    }

    #[test]
    fn test_service_feed_line_format() {
        let line = ServiceCheckFeed
            .render(&service_event(CheckPhase::Processed))
            .unwrap();
        assert_eq!(line, "web01;http from 0 -> 2: CRITICAL - connection refused\n");
    }

    #[test]
    fn test_unprocessed_checks_are_declined() {
        assert!(HostCheckFeed.render(&host_event(CheckPhase::Initiated)).is_none());
        assert!(ServiceCheckFeed
            .render(&service_event(CheckPhase::Initiated))
            .is_none());
    }

    #[test]
    fn test_foreign_kinds_are_declined() {
        assert!(HostCheckFeed.render(&service_event(CheckPhase::Processed)).is_none());
        assert!(ServiceCheckFeed.render(&host_event(CheckPhase::Processed)).is_none());
    }

    #[test]
    fn test_standard_channels_match_their_kinds() {
        let defs = standard_channels();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "hostchecks");
        assert_eq!(defs[0].kinds, vec![EventKind::HostCheck]);
        assert_eq!(defs[1].name, "servicechecks");
        assert_eq!(defs[1].kinds, vec![EventKind::ServiceCheck]);
    }
}
