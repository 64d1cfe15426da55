//! Blocking UDP socket abstraction.
//!
//! [`Socket`] is a thin wrapper around `std::net::UdpSocket` that hands raw
//! datagram bytes to the caller. All protocol logic lives elsewhere; this
//! module owns only byte I/O. The transfer model is single-threaded and
//! blocking throughout: the sender's ack wait is bounded by a per-call
//! timeout, the receiver's data wait blocks indefinitely.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Maximum UDP payload size (theoretical limit; in practice kept much smaller).
pub const MAX_DATAGRAM: usize = 65_535;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can arise from socket operations.
#[derive(Debug)]
pub enum SocketError {
    /// Underlying I/O error from the OS.
    Io(std::io::Error),
    /// No datagram arrived within the receive timeout.
    Timeout,
}

impl std::fmt::Display for SocketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "socket I/O error: {e}"),
            Self::Timeout => write!(f, "receive timed out"),
        }
    }
}

impl std::error::Error for SocketError {}

impl From<std::io::Error> for SocketError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Io(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Socket
// ---------------------------------------------------------------------------

/// A blocking, datagram-oriented UDP socket.
#[derive(Debug)]
pub struct Socket {
    /// Address this socket is bound to (filled in after OS assigns ephemeral port).
    pub local_addr: SocketAddr,
    inner: UdpSocket,
}

impl Socket {
    /// Bind a new socket to `local_addr`.
    ///
    /// Passing port `0` lets the OS choose an ephemeral port.
    pub fn bind(local_addr: SocketAddr) -> Result<Self, SocketError> {
        let inner = UdpSocket::bind(local_addr)?;
        let local_addr = inner.local_addr()?;
        Ok(Self { local_addr, inner })
    }

    /// Send `bytes` as a single UDP datagram to `dest`.
    pub fn send_to(&self, bytes: &[u8], dest: SocketAddr) -> Result<(), SocketError> {
        self.inner.send_to(bytes, dest)?;
        Ok(())
    }

    /// Receive the next datagram.
    ///
    /// With `timeout = Some(d)`, waits at most `d` and returns
    /// [`SocketError::Timeout`] if nothing arrived. With `timeout = None`,
    /// blocks until a datagram arrives.
    ///
    /// Returns `(bytes, sender_address)`.
    pub fn recv_from(
        &self,
        timeout: Option<Duration>,
    ) -> Result<(Vec<u8>, SocketAddr), SocketError> {
        self.inner.set_read_timeout(timeout)?;
        let mut buf = vec![0u8; MAX_DATAGRAM];
        let (n, addr) = self.inner.recv_from(&mut buf)?;
        buf.truncate(n);
        Ok((buf, addr))
    }
}

/// Resolve a `host:port` string to a socket address.
///
/// Fails before any packet is sent when the destination is unresolvable.
pub fn resolve(addr: &str) -> Result<SocketAddr, std::io::Error> {
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("no address found for {addr}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ephemeral() -> Socket {
        Socket::bind("127.0.0.1:0".parse().unwrap()).expect("bind failed")
    }

    #[test]
    fn bind_assigns_local_addr() {
        let s = ephemeral();
        assert_ne!(s.local_addr.port(), 0);
    }

    #[test]
    fn send_and_recv_loopback() {
        let a = ephemeral();
        let b = ephemeral();
        a.send_to(b"ping", b.local_addr).unwrap();
        let (bytes, from) = b.recv_from(Some(Duration::from_secs(1))).unwrap();
        assert_eq!(bytes, b"ping");
        assert_eq!(from, a.local_addr);
    }

    #[test]
    fn recv_timeout_reported() {
        let s = ephemeral();
        match s.recv_from(Some(Duration::from_millis(20))) {
            Err(SocketError::Timeout) => {}
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert!(resolve("definitely-not-a-host-xyz:99999").is_err());
    }

    #[test]
    fn resolve_accepts_host_port() {
        let addr = resolve("127.0.0.1:5000").unwrap();
        assert_eq!(addr.port(), 5000);
    }
}
