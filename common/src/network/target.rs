//! # Bridge Target Model
//!
//! Defines the remote endpoint a single bridge request acts on.
//!
//! A [`Target`] is only ever built from validated form input: the address
//! must be a well-formed IPv4 or IPv6 literal and the port a base-10
//! integer in `1..=65535`. Hostnames are rejected outright, never
//! resolved. Anything that fails here must never reach the transaction
//! logic.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// A validated (IP, port) pair identifying the remote TCP endpoint for
/// one request. Reconstructed fresh on every request, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub addr: IpAddr,
    pub port: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid IP literal: {0}")]
    Address(String),
    #[error("invalid port: {0}")]
    Port(String),
}

impl Target {
    /// Validates the raw `ip` and `port` strings of a request.
    ///
    /// The address is parsed strictly as an IP literal. Ports outside
    /// `1..=65535` fail, including `0`, which `u16` would otherwise
    /// happily accept.
    pub fn from_parts(ip: &str, port: &str) -> Result<Self, TargetError> {
        let addr: IpAddr = ip
            .parse::<IpAddr>()
            .map_err(|_| TargetError::Address(ip.to_string()))?;

        let port_num: u16 = port
            .parse::<u16>()
            .map_err(|_| TargetError::Port(port.to_string()))?;

        if port_num == 0 {
            return Err(TargetError::Port(port.to_string()));
        }

        Ok(Self {
            addr,
            port: port_num,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
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
