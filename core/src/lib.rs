//! The TCP bridge core.
//!
//! Turns one validated (target, action, payload) tuple into one TCP
//! interaction and a structured [`bridge::Outcome`]. Every invocation is
//! a self-contained one-shot: no socket, session or cache survives past
//! a single request.

pub mod bridge;
pub mod codec;
pub mod network;
