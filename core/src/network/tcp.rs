use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Read chunk size for the drain loop.
const DRAIN_BUF_LEN: usize = 1024;

/// Attempts a TCP handshake with the endpoint, then closes the
/// connection without writing anything.
pub async fn probe(addr: SocketAddr, probe_timeout: Duration) -> io::Result<()> {
    let stream: TcpStream = connect(addr, probe_timeout).await?;
    drop(stream);
    Ok(())
}

/// One full send transaction: connect, write the whole payload, drain
/// whatever the peer answers, close. The socket is scope-owned, so it
/// is released on the write-failure path as well as on success.
pub async fn exchange(
    addr: SocketAddr,
    payload: &[u8],
    connect_timeout: Duration,
    read_timeout: Duration,
) -> io::Result<Vec<u8>> {
    let mut stream: TcpStream = connect(addr, connect_timeout).await?;
    stream.write_all(payload).await?;
    Ok(drain(&mut stream, read_timeout).await)
}

async fn connect(addr: SocketAddr, connect_timeout: Duration) -> io::Result<TcpStream> {
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(error)) => Err(error),
        Err(_elapsed) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "connection attempt timed out",
        )),
    }
}

/// Accumulates everything the peer writes back. The loop ends on clean
/// EOF or on a read that stalls past `read_timeout`. A non-timeout read
/// error also ends the loop without being escalated: whatever arrived
/// before it still counts as the response.
async fn drain(stream: &mut TcpStream, read_timeout: Duration) -> Vec<u8> {
    let mut response: Vec<u8> = Vec::new();
    let mut buf = [0u8; DRAIN_BUF_LEN];

    loop {
        match timeout(read_timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => response.extend_from_slice(&buf[..n]),
            Ok(Err(error)) => {
                debug!("read error while draining response: {error}");
                break;
            }
            Err(_elapsed) => break,
        }
    }

    response
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
