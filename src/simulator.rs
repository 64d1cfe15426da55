//! Fault-injecting socket wrapper for deterministic testing.
//!
//! Real networks drop and duplicate datagrams. To exercise the retry and
//! abandonment paths without depending on actual network conditions,
//! [`LossySocket`] wraps a [`Socket`] and applies a configurable fault model
//! on the send side. All randomness comes from a seeded RNG, so a given
//! seed reproduces the same fault pattern every run.
//!
//! Production code talks to the real socket layer directly; this wrapper is
//! used by the integration tests' scripted peers.

use std::net::SocketAddr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::socket::{Socket, SocketError};

/// Configuration for the fault model.
///
/// Probabilities are in `[0.0, 1.0]`.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Probability that any given outbound datagram is silently dropped.
    pub loss_rate: f64,
    /// Probability that an outbound datagram is delivered twice.
    pub duplicate_rate: f64,
    /// RNG seed; the same seed reproduces the same fault pattern.
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        // No faults: a transparent pass-through.
        Self {
            loss_rate: 0.0,
            duplicate_rate: 0.0,
            seed: 0,
        }
    }
}

/// A socket that loses and duplicates outbound datagrams on purpose.
#[derive(Debug)]
pub struct LossySocket {
    inner: Socket,
    config: SimulatorConfig,
    rng: StdRng,
    /// Datagrams actually handed to the OS.
    pub sent: u64,
    /// Datagrams swallowed by the fault model.
    pub dropped: u64,
}

impl LossySocket {
    pub fn new(inner: Socket, config: SimulatorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            inner,
            config,
            rng,
            sent: 0,
            dropped: 0,
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    /// Send `bytes` to `dest`, subject to the fault model.
    ///
    /// A dropped datagram still returns `Ok(())` — the caller cannot tell,
    /// which is the point.
    pub fn send_to(&mut self, bytes: &[u8], dest: SocketAddr) -> Result<(), SocketError> {
        if self.config.loss_rate > 0.0 && self.rng.gen_bool(self.config.loss_rate) {
            self.dropped += 1;
            return Ok(());
        }
        self.inner.send_to(bytes, dest)?;
        self.sent += 1;
        if self.config.duplicate_rate > 0.0 && self.rng.gen_bool(self.config.duplicate_rate) {
            self.inner.send_to(bytes, dest)?;
            self.sent += 1;
        }
        Ok(())
    }

    /// Receive the next datagram; inbound traffic is never faulted.
    pub fn recv_from(
        &self,
        timeout: Option<Duration>,
    ) -> Result<(Vec<u8>, SocketAddr), SocketError> {
        self.inner.recv_from(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Socket, Socket) {
        let a = Socket::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let b = Socket::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        (a, b)
    }

    #[test]
    fn pass_through_by_default() {
        let (a, b) = pair();
        let mut lossy = LossySocket::new(a, SimulatorConfig::default());
        for _ in 0..10 {
            lossy.send_to(b"x", b.local_addr).unwrap();
        }
        assert_eq!(lossy.sent, 10);
        assert_eq!(lossy.dropped, 0);
        for _ in 0..10 {
            b.recv_from(Some(Duration::from_secs(1))).unwrap();
        }
    }

    #[test]
    fn total_loss_drops_everything() {
        let (a, b) = pair();
        let mut lossy = LossySocket::new(
            a,
            SimulatorConfig {
                loss_rate: 1.0,
                ..SimulatorConfig::default()
            },
        );
        for _ in 0..5 {
            lossy.send_to(b"x", b.local_addr).unwrap();
        }
        assert_eq!(lossy.sent, 0);
        assert_eq!(lossy.dropped, 5);
        assert!(matches!(
            b.recv_from(Some(Duration::from_millis(50))),
            Err(SocketError::Timeout)
        ));
    }

    #[test]
    fn same_seed_same_fault_pattern() {
        let (a, b) = pair();
        let config = SimulatorConfig {
            loss_rate: 0.5,
            duplicate_rate: 0.0,
            seed: 42,
        };
        let mut first = LossySocket::new(a, config.clone());
        for _ in 0..50 {
            first.send_to(b"x", b.local_addr).unwrap();
        }

        let (c, d) = pair();
        let mut second = LossySocket::new(c, config);
        for _ in 0..50 {
            second.send_to(b"x", d.local_addr).unwrap();
        }

        assert_eq!(first.dropped, second.dropped);
        assert_eq!(first.sent, second.sent);
    }

    #[test]
    fn duplication_sends_twice() {
        let (a, b) = pair();
        let mut lossy = LossySocket::new(
            a,
            SimulatorConfig {
                loss_rate: 0.0,
                duplicate_rate: 1.0,
                seed: 0,
            },
        );
        lossy.send_to(b"x", b.local_addr).unwrap();
        assert_eq!(lossy.sent, 2);
        b.recv_from(Some(Duration::from_secs(1))).unwrap();
        b.recv_from(Some(Duration::from_secs(1))).unwrap();
    }
}
