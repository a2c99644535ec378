//! The request bridge: one stateless action per invocation.
//!
//! Dispatches a validated request to the connect-probe, the disconnect
//! acknowledgement or the send-and-drain transaction, and maps every
//! terminal state onto a single [`Outcome`]. Raw errors never cross
//! this boundary as anything but a short human-readable message.

use std::io;
use std::time::Duration;

use tcpoke_common::network::target::Target;
use tracing::{debug, info};

use crate::codec::Payload;
use crate::network::tcp;

/// The three operations a caller can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Connect-only reachability test; exchanges no application data.
    Probe,
    /// Stateless "disconnected" acknowledgement. There is no connection
    /// to tear down; this only lets the caller reset its display flag.
    Acknowledge,
    /// Send-and-drain: connect, write the payload, read until EOF or a
    /// stalled read, close.
    Transact(Payload),
}

/// Wall-clock bounds for the blocking waits of a request.
#[derive(Clone, Copy, Debug)]
pub struct Timeouts {
    /// Connect bound for the probe action.
    pub probe: Duration,
    /// Connect bound for the send transaction.
    pub connect: Duration,
    /// Per-read bound while draining the response.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(2),
            connect: Duration::from_secs(10),
            read: Duration::from_secs(2),
        }
    }
}

/// The structured result of one bridge invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: Option<String>,
    pub response: Option<String>,
}

impl Outcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            response: None,
        }
    }

    fn responded(response: String) -> Self {
        Self {
            success: true,
            message: None,
            response: Some(response),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            response: None,
        }
    }
}

/// The stateless request handler. Holds nothing but the configured
/// timeouts; every action is a fresh one-shot TCP interaction, so there
/// is no connection state to coordinate between requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bridge {
    timeouts: Timeouts,
}

impl Bridge {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Executes one action against `target`.
    pub async fn handle(&self, target: Target, action: Action) -> Outcome {
        match action {
            Action::Probe => self.probe(target).await,
            Action::Acknowledge => acknowledge(),
            Action::Transact(payload) => self.transact(target, payload).await,
        }
    }

    async fn probe(&self, target: Target) -> Outcome {
        debug!("probing {target}");
        match tcp::probe(target.socket_addr(), self.timeouts.probe).await {
            Ok(()) => {
                info!("probe of {target} succeeded");
                Outcome::ok("Connection successful")
            }
            Err(error) => {
                info!("probe of {target} failed: {error}");
                Outcome::rejected(connect_error(&error))
            }
        }
    }

    async fn transact(&self, target: Target, payload: Payload) -> Outcome {
        let bytes = match payload.wire_bytes() {
            Ok(bytes) => bytes,
            Err(error) => return Outcome::rejected(error.to_string()),
        };

        debug!("sending {} bytes to {target}", bytes.len());
        let exchanged = tcp::exchange(
            target.socket_addr(),
            &bytes,
            self.timeouts.connect,
            self.timeouts.read,
        )
        .await;

        match exchanged {
            Ok(received) => {
                debug!("received {} bytes from {target}", received.len());
                Outcome::responded(payload.render_response(&received))
            }
            Err(error) => {
                info!("send to {target} failed: {error}");
                Outcome::rejected(connect_error(&error))
            }
        }
    }
}

fn acknowledge() -> Outcome {
    Outcome::ok("The connection is lost")
}

/// "Connection error: <description> (<code>)"; the code is appended
/// when the OS supplies one.
fn connect_error(error: &io::Error) -> String {
    match error.raw_os_error() {
        Some(code) => format!("Connection error: {error} ({code})"),
        None => format!("Connection error: {error}"),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
