//! # Inline Dispatch Example
//!
//! Drives the dispatcher directly, with no sockets: a stdout transport
//! stands in for the reactor and events are delivered in-process.
//!
//! Demonstrates:
//! - Control-protocol subscribe/list against the registry
//! - Route-driven delivery of host events
//! - The global subscriber canceller
//!
//! ## Run
//! ```bash
//! cargo run --example inline_dispatch
//! ```

use feedcast::feeds::standard_channels;
use feedcast::{
    CheckPhase, ConnId, Dispatcher, EngineEvent, HostCheckData, RoutingBroker, ServiceCheckData,
    Transport, WriteOutcome,
};

/// Prints every payload instead of writing to a socket.
struct StdoutTransport;

impl Transport for StdoutTransport {
    fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome {
        print!("[conn {conn}] {}", String::from_utf8_lossy(payload));
        WriteOutcome::Done
    }

    fn close(&mut self, conn: ConnId) {
        println!("[conn {conn}] transport closed");
    }
}

fn publish(
    dispatcher: &mut Dispatcher<RoutingBroker, StdoutTransport>,
    event: EngineEvent,
) {
    for id in dispatcher.broker().routes(event.kind()) {
        dispatcher.deliver(id, &event).expect("channel exists");
    }
}

fn main() {
    let mut dispatcher = Dispatcher::with_channels(
        RoutingBroker::new(),
        StdoutTransport,
        standard_channels(),
    );
    let (alice, bob) = (ConnId::new(1), ConnId::new(2));

    // ============================================================
    // Demo 1: subscribe over the control protocol
    // ============================================================
    println!(" ─► alice subscribes to hostchecks, bob to both channels...");
    dispatcher.handle_control(alice, "subscribe hostchecks");
    dispatcher.handle_control(bob, "subscribe hostchecks");
    dispatcher.handle_control(bob, "subscribe servicechecks:brief");

    // ============================================================
    // Demo 2: deliver engine events (bob sees them first, he is newest)
    // ============================================================
    publish(
        &mut dispatcher,
        EngineEvent::HostCheck(HostCheckData {
            phase: CheckPhase::Processed,
            name: "web01".into(),
            last_state: 0,
            current_state: 1,
            output: "PING CRITICAL - packet loss".into(),
        }),
    );
    publish(
        &mut dispatcher,
        EngineEvent::ServiceCheck(ServiceCheckData {
            phase: CheckPhase::Processed,
            host_name: "web01".into(),
            description: "http".into(),
            last_state: 0,
            current_state: 2,
            output: "CRITICAL - connection refused".into(),
        }),
    );

    // ============================================================
    // Demo 3: cancel bob everywhere, alice keeps her feed
    // ============================================================
    println!(" ─► cancelling bob...");
    dispatcher.cancel_subscriber(bob);
    publish(
        &mut dispatcher,
        EngineEvent::HostCheck(HostCheckData {
            phase: CheckPhase::Processed,
            name: "web01".into(),
            last_state: 1,
            current_state: 0,
            output: "PING OK - 0.4ms".into(),
        }),
    );
}
