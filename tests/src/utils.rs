#![cfg(test)]
//! Loopback peers for exercising the bridge end to end.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Binds an ephemeral listener whose first connection is read once,
/// answered with `reply`, then closed. The returned receiver yields the
/// bytes the peer actually received; it stays empty if nothing ever
/// connects.
pub async fn spawn_scripted_peer(reply: Vec<u8>) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind scripted peer");
    let addr: SocketAddr = listener.local_addr().expect("scripted peer address");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let _ = tx.send(buf[..n].to_vec());
            let _ = stream.write_all(&reply).await;
            // Dropping the stream closes the connection: clean EOF.
        }
    });

    (addr, rx)
}

/// Binds an ephemeral listener that accepts and then neither writes nor
/// closes for the rest of the test, forcing the drain to time out.
pub async fn spawn_silent_peer() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind silent peer");
    let addr: SocketAddr = listener.local_addr().expect("silent peer address");

    tokio::spawn(async move {
        if let Ok((_stream, _)) = listener.accept().await {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
    });

    addr
}

/// An address on which nothing is listening: the port was live for a
/// moment and then released, so connecting gets a refusal.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr: SocketAddr = listener.local_addr().expect("listener address");
    drop(listener);
    addr
}
