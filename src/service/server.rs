//! Feed service: accept loop, line framing, and the dispatcher task.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::unix::OwnedReadHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::broker::RoutingBroker;
use crate::channels::ChannelDef;
use crate::dispatch::Dispatcher;
use crate::events::EngineEvent;
use crate::transport::{ConnId, Transport};

use super::{ServiceConfig, UnixTransport};

type FeedDispatcher = Dispatcher<RoutingBroker, UnixTransport>;

/// Stimuli funneled into the dispatcher loop.
enum ServiceOp {
    /// One framed control request line from a client.
    Request { conn: ConnId, line: String },
    /// A client's read side reached EOF or failed.
    Disconnected { conn: ConnId },
    /// A producer handed over a host event.
    Publish { event: EngineEvent },
}

/// The feed service is gone; the event was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("feed service is not running")]
pub struct ServiceClosed;

/// Cloneable producer/control handle for a running [`FeedService`].
#[derive(Clone)]
pub struct FeedHandle {
    ops: mpsc::Sender<ServiceOp>,
    cancel: CancellationToken,
}

impl FeedHandle {
    /// Hands a host event to the dispatcher loop.
    ///
    /// Waits while the command queue is full; fails only once the service
    /// stopped. The event reaches every channel whose kind registration is
    /// currently live, which is exactly the set of channels with
    /// subscribers interested in it.
    pub async fn publish(&self, event: EngineEvent) -> Result<(), ServiceClosed> {
        self.ops
            .send(ServiceOp::Publish { event })
            .await
            .map_err(|_| ServiceClosed)
    }

    /// Requests service shutdown. Idempotent, returns immediately.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Unix-socket subscriber service wrapping one [`Dispatcher`].
pub struct FeedService {
    cfg: ServiceConfig,
    listener: UnixListener,
    dispatcher: FeedDispatcher,
    ops: mpsc::Receiver<ServiceOp>,
    ops_tx: mpsc::Sender<ServiceOp>,
    cancel: CancellationToken,
}

impl FeedService {
    /// Binds the control socket and builds the channel registry.
    ///
    /// A stale socket file at the configured path is removed first. The
    /// returned handle controls the service; clones of it can be handed to
    /// every producer.
    pub fn bind(
        cfg: ServiceConfig,
        channels: Vec<ChannelDef>,
    ) -> io::Result<(FeedService, FeedHandle)> {
        let _ = std::fs::remove_file(&cfg.socket_path);
        let listener = UnixListener::bind(&cfg.socket_path)?;
        let dispatcher =
            Dispatcher::with_channels(RoutingBroker::new(), UnixTransport::new(), channels);
        let (ops_tx, ops) = mpsc::channel(cfg.command_capacity_clamped());
        let cancel = CancellationToken::new();

        let handle = FeedHandle {
            ops: ops_tx.clone(),
            cancel: cancel.clone(),
        };
        let service = FeedService {
            cfg,
            listener,
            dispatcher,
            ops,
            ops_tx,
            cancel,
        };
        Ok((service, handle))
    }

    /// Runs the dispatcher loop until shutdown is requested.
    ///
    /// Everything that mutates the dispatcher happens here, sequentially:
    /// accepted connections, control requests, disconnects, and published
    /// events. On exit the registry is torn down and the socket file
    /// removed.
    pub async fn run(self) -> io::Result<()> {
        let FeedService {
            cfg,
            listener,
            mut dispatcher,
            mut ops,
            ops_tx,
            cancel,
        } = self;
        let mut next_conn: u64 = 0;

        info!(path = %cfg.socket_path.display(), "feed service listening");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        next_conn += 1;
                        admit(
                            &mut dispatcher,
                            stream,
                            ConnId::new(next_conn),
                            &ops_tx,
                            &cancel,
                            cfg.max_request_len,
                        );
                    }
                    Err(err) => warn!(error = %err, "accept failed"),
                },
                op = ops.recv() => match op {
                    Some(op) => apply(&mut dispatcher, op),
                    None => break,
                },
            }
        }

        cancel.cancel();
        dispatcher.shutdown();
        let _ = std::fs::remove_file(&cfg.socket_path);
        info!("feed service stopped");
        Ok(())
    }
}

/// Registers an accepted connection and spawns its reader task.
fn admit(
    dispatcher: &mut FeedDispatcher,
    stream: UnixStream,
    conn: ConnId,
    ops_tx: &mpsc::Sender<ServiceOp>,
    cancel: &CancellationToken,
    max_request_len: usize,
) {
    let (read_half, write_half) = stream.into_split();
    let stop = cancel.child_token();
    dispatcher
        .transport_mut()
        .insert(conn, write_half, stop.clone());
    tokio::spawn(read_requests(
        conn,
        read_half,
        ops_tx.clone(),
        stop,
        max_request_len,
    ));
    debug!(%conn, "client connected");
}

/// Applies one queued stimulus to the dispatcher.
fn apply(dispatcher: &mut FeedDispatcher, op: ServiceOp) {
    match op {
        ServiceOp::Request { conn, line } => {
            let status = dispatcher.handle_control(conn, &line);
            if !status.is_ok() {
                let reply = format!("{}: bad request\n", status.code());
                let _ = dispatcher.transport_mut().write(conn, reply.as_bytes());
            }
        }
        ServiceOp::Disconnected { conn } => {
            debug!(%conn, "client disconnected");
            dispatcher.cancel_subscriber(conn);
        }
        ServiceOp::Publish { event } => {
            for id in dispatcher.broker().routes(event.kind()) {
                if let Err(err) = dispatcher.deliver(id, &event) {
                    warn!(channel = %id, error = %err, "delivery aborted");
                }
            }
        }
    }
}

/// Frames newline-terminated request lines off one connection.
///
/// Trailing `\n`, `\r`, and NUL bytes are stripped before the line reaches
/// the protocol handler. A line exceeding `max_len` without a newline
/// drops the connection. EOF and read errors report a disconnect.
async fn read_requests(
    conn: ConnId,
    read_half: OwnedReadHalf,
    ops_tx: mpsc::Sender<ServiceOp>,
    stop: CancellationToken,
    max_len: usize,
) {
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let mut limited = (&mut reader).take(max_len as u64 + 1);
        let read = tokio::select! {
            _ = stop.cancelled() => break,
            read = limited.read_until(b'\n', &mut buf) => read,
        };
        match read {
            Ok(0) => break,
            Ok(n) => {
                if n > max_len && !buf.ends_with(b"\n") {
                    warn!(%conn, "request line too long");
                    break;
                }
                while matches!(buf.last(), Some(b'\n' | b'\r' | b'\0')) {
                    buf.pop();
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                if ops_tx.send(ServiceOp::Request { conn, line }).await.is_err() {
                    return;
                }
            }
            Err(err) => {
                debug!(%conn, error = %err, "read failed");
                break;
            }
        }
    }

    let _ = ops_tx.send(ServiceOp::Disconnected { conn }).await;
}
