//! Transfer configuration: discipline selection and tunable parameters.
//!
//! Defaults match the reference deployment: 500-byte chunks (Ethernet MTU
//! minus IP and UDP headers), a 1-second ack timeout, a window parameter of
//! 256, and 5 transmission attempts per chunk.

use std::str::FromStr;
use std::time::Duration;

/// The selectable ARQ discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One packet in flight; ack echoes the packet's sequence number.
    #[default]
    StopAndWait,
    /// Cumulative acks and a bounded reorder buffer on the receive side.
    /// The send side stays serialized regardless of window size.
    Window,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::StopAndWait => write!(f, "stop-and-wait"),
            Mode::Window => write!(f, "window"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts the spelled-out names and the numeric selectors `0` / `1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop-and-wait" | "0" => Ok(Mode::StopAndWait),
            "window" | "1" => Ok(Mode::Window),
            other => Err(format!(
                "unknown mode {other:?} (expected stop-and-wait/0 or window/1)"
            )),
        }
    }
}

/// Tunable parameters for one transfer.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// ARQ discipline for this transfer.
    pub mode: Mode,
    /// Window parameter; bounds the receiver's reorder buffer.
    pub window_size: usize,
    /// Maximum payload bytes per data packet.
    pub chunk_size: usize,
    /// How long the sender waits for an acknowledgment per attempt.
    pub timeout: Duration,
    /// Transmission attempts per chunk before abandoning it.
    pub max_attempts: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            mode: Mode::StopAndWait,
            window_size: 256,
            chunk_size: 500,
            timeout: Duration::from_millis(1000),
            max_attempts: crate::sender::MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = TransferConfig::default();
        assert_eq!(c.mode, Mode::StopAndWait);
        assert_eq!(c.chunk_size, 500);
        assert_eq!(c.window_size, 256);
        assert_eq!(c.timeout, Duration::from_millis(1000));
        assert_eq!(c.max_attempts, 5);
    }

    #[test]
    fn mode_parses_names_and_numbers() {
        assert_eq!("stop-and-wait".parse::<Mode>().unwrap(), Mode::StopAndWait);
        assert_eq!("0".parse::<Mode>().unwrap(), Mode::StopAndWait);
        assert_eq!("window".parse::<Mode>().unwrap(), Mode::Window);
        assert_eq!("1".parse::<Mode>().unwrap(), Mode::Window);
        assert!("selective-repeat".parse::<Mode>().is_err());
    }
}
