//! # Feed Service Example
//!
//! Runs the Unix-socket feed service with a synthetic producer that
//! publishes a host and a service check every second.
//!
//! ## Run
//! ```bash
//! cargo run --example feed_service --features service
//! ```
//!
//! Then, from another terminal:
//! ```bash
//! socat - UNIX-CONNECT:/tmp/feedcast.sock
//! help
//! subscribe hostchecks
//! ```

use std::time::Duration;

use feedcast::feeds::standard_channels;
use feedcast::service::{FeedService, ServiceConfig};
use feedcast::{CheckPhase, EngineEvent, HostCheckData, ServiceCheckData};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::temp_dir().join("feedcast.sock");
    let (service, handle) = FeedService::bind(ServiceConfig::new(&path), standard_channels())?;
    println!(" ─► feed service listening on {}", path.display());
    println!(" ─► connect with: socat - UNIX-CONNECT:{}", path.display());
    let server = tokio::spawn(service.run());

    let producer = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        let mut state = 0;
        loop {
            ticker.tick().await;
            let next = (state + 1) % 3;
            let host = EngineEvent::HostCheck(HostCheckData {
                phase: CheckPhase::Processed,
                name: "web01".into(),
                last_state: state,
                current_state: next,
                output: "PING OK - 0.4ms".into(),
            });
            let http = EngineEvent::ServiceCheck(ServiceCheckData {
                phase: CheckPhase::Processed,
                host_name: "web01".into(),
                description: "http".into(),
                last_state: state,
                current_state: next,
                output: "HTTP OK - 200".into(),
            });
            if producer.publish(host).await.is_err() || producer.publish(http).await.is_err() {
                break;
            }
            state = next;
        }
    });

    tokio::signal::ctrl_c().await?;
    println!(" ─► shutting down...");
    handle.shutdown();
    server.await??;
    Ok(())
}
