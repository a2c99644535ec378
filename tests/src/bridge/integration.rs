#![cfg(test)]
//! End-to-end bridge runs against live loopback peers.
//!
//! These cover the behavior that unit tests cannot: real connects,
//! refusals, the drain's EOF and timeout exits, and the promise that
//! rejected payloads never touch the network.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tcpoke_common::network::target::Target;
use tcpoke_core::bridge::{Action, Bridge, Timeouts};
use tcpoke_core::codec::Payload;

use crate::utils;

fn target_for(addr: SocketAddr) -> Target {
    Target::from_parts(&addr.ip().to_string(), &addr.port().to_string())
        .expect("loopback target should validate")
}

/// A bridge with a short drain so timeout tests stay fast.
fn quick_bridge() -> Bridge {
    Bridge::new(Timeouts {
        probe: Duration::from_secs(2),
        connect: Duration::from_secs(2),
        read: Duration::from_millis(300),
    })
}

#[tokio::test]
async fn probe_reaches_listening_peer() {
    let (addr, _rx) = utils::spawn_scripted_peer(Vec::new()).await;

    let outcome = quick_bridge()
        .handle(target_for(addr), Action::Probe)
        .await;

    assert!(outcome.success, "probe failed: {:?}", outcome.message);
    assert_eq!(outcome.message.as_deref(), Some("Connection successful"));
    assert_eq!(outcome.response, None);
}

#[tokio::test]
async fn probe_reports_refused_connection() {
    let addr = utils::refused_addr().await;

    let outcome = quick_bridge()
        .handle(target_for(addr), Action::Probe)
        .await;

    assert!(!outcome.success);
    let message = outcome.message.expect("refusal should carry a message");
    assert!(
        message.starts_with("Connection error: "),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn transact_text_round_trip() {
    let (addr, received) = utils::spawn_scripted_peer(b"pong\r\n".to_vec()).await;

    let payload = Payload::Text("Hello".to_string());
    let outcome = quick_bridge()
        .handle(target_for(addr), Action::Transact(payload))
        .await;

    assert!(outcome.success, "send failed: {:?}", outcome.message);
    // The wire bytes are the UTF-8 of the original text, unmodified.
    assert_eq!(received.await.unwrap(), b"Hello".to_vec());
    // The text-mode response comes back trimmed.
    assert_eq!(outcome.response.as_deref(), Some("pong"));
}

#[tokio::test]
async fn transact_hex_round_trip() {
    let reply: Vec<u8> = vec![0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x6f];
    let (addr, received) = utils::spawn_scripted_peer(reply).await;

    let payload = Payload::Hex("48656c6c6f".to_string());
    let outcome = quick_bridge()
        .handle(target_for(addr), Action::Transact(payload))
        .await;

    assert!(outcome.success, "send failed: {:?}", outcome.message);
    assert_eq!(received.await.unwrap(), b"Hello".to_vec());
    assert_eq!(outcome.response.as_deref(), Some("48656c6c6f6f"));
}

#[tokio::test]
async fn transact_silent_peer_times_out_into_empty_success() {
    let addr = utils::spawn_silent_peer().await;

    let started = Instant::now();
    let outcome = quick_bridge()
        .handle(
            target_for(addr),
            Action::Transact(Payload::Text("anyone there?".to_string())),
        )
        .await;
    let elapsed = started.elapsed();

    // A peer that never answers is not an error: empty response, and
    // the transaction returns within the read-timeout bound.
    assert!(outcome.success, "timeout drain should still succeed");
    assert_eq!(outcome.response.as_deref(), Some(""));
    assert!(
        elapsed < Duration::from_secs(2),
        "drain did not respect the read timeout: {elapsed:?}"
    );
}

#[tokio::test]
async fn transact_refused_connection_is_an_error() {
    let addr = utils::refused_addr().await;

    let outcome = quick_bridge()
        .handle(
            target_for(addr),
            Action::Transact(Payload::Text("hello".to_string())),
        )
        .await;

    assert!(!outcome.success);
    let message = outcome.message.expect("refusal should carry a message");
    assert!(message.starts_with("Connection error: "));
    assert_eq!(outcome.response, None);
}

#[tokio::test]
async fn rejected_payload_never_connects() {
    let (addr, mut received) = utils::spawn_scripted_peer(b"never sent".to_vec()).await;

    // 33 bytes of hex: over the size budget.
    let oversized = Payload::Hex("ab".repeat(33));
    let outcome = quick_bridge()
        .handle(target_for(addr), Action::Transact(oversized))
        .await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Hex data must be between 1-32 bytes")
    );

    // Give a stray connection a moment to surface, then confirm the
    // peer never saw one.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(
        received.try_recv().is_err(),
        "validation failure must not open a connection"
    );
}
