//! Outbound per-chunk state machine for the send/await/retry/abandon cycle.
//!
//! [`ChunkSender`] tracks the lifecycle of a single chunk from first
//! transmission to a matching acknowledgment or to abandonment after the
//! retry limit. It does **not** touch the socket; [`crate::engine`] calls
//! these methods and owns the actual send/receive loop.
//!
//! # Contract
//! - Exactly **one** chunk is in flight at any moment; a new [`ChunkSender`]
//!   is created per chunk. Both disciplines serialize sends this way — the
//!   configured window size does not change the number of outstanding
//!   chunks.
//! - Every transmission attempt passes through [`on_sent`].
//! - A matching ack moves the chunk to [`ChunkState::Delivered`].
//! - A timeout or a mismatched ack moves it back to
//!   [`ChunkState::AwaitingSend`] for a resend, or — once the attempt limit
//!   is reached — to [`ChunkState::Abandoned`]. Abandonment is an accepted
//!   loss, not an error: the engine advances to the next chunk and the loss
//!   shows up only in the final statistics.
//!
//! [`on_sent`]: ChunkSender::on_sent

/// Maximum transmissions of one chunk before it is abandoned.
pub const MAX_ATTEMPTS: u32 = 5;

/// Lifecycle states of one chunk on the send side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// The next action is a (re)transmission.
    AwaitingSend,
    /// Transmitted; blocking for an acknowledgment.
    AwaitingAck,
    /// A matching acknowledgment arrived. Terminal.
    Delivered,
    /// The attempt limit was reached without a matching ack. Terminal.
    Abandoned,
}

/// Send-side state for one chunk.
#[derive(Debug)]
pub struct ChunkSender {
    /// Sequence number carried by every transmission of this chunk.
    pub seq: u32,
    /// Transmissions so far (1 = first send has happened).
    pub attempts: u32,
    state: ChunkState,
    max_attempts: u32,
}

impl ChunkSender {
    /// Start the lifecycle of chunk `seq` in [`ChunkState::AwaitingSend`].
    pub fn new(seq: u32) -> Self {
        Self::with_limit(seq, MAX_ATTEMPTS)
    }

    /// Like [`new`](Self::new) with an explicit attempt limit.
    pub fn with_limit(seq: u32, max_attempts: u32) -> Self {
        assert!(max_attempts >= 1, "max_attempts must be at least 1");
        Self {
            seq,
            attempts: 0,
            state: ChunkState::AwaitingSend,
            max_attempts,
        }
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// `true` once the chunk is [`Delivered`](ChunkState::Delivered) or
    /// [`Abandoned`](ChunkState::Abandoned).
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, ChunkState::Delivered | ChunkState::Abandoned)
    }

    /// `true` when the next transmission would be a resend (attempt ≥ 2).
    pub fn is_retry(&self) -> bool {
        self.attempts > 0
    }

    /// Record one transmission attempt.
    ///
    /// Panics in debug mode unless the state is
    /// [`ChunkState::AwaitingSend`].
    pub fn on_sent(&mut self) {
        debug_assert_eq!(
            self.state,
            ChunkState::AwaitingSend,
            "on_sent called outside AwaitingSend"
        );
        self.attempts += 1;
        self.state = ChunkState::AwaitingAck;
    }

    /// Process an inbound acknowledgment value.
    ///
    /// A value equal to this chunk's sequence number completes delivery.
    /// Any other value is a mismatch and takes the same retry path as a
    /// timeout.
    pub fn on_ack(&mut self, ack: u32) -> ChunkState {
        debug_assert_eq!(
            self.state,
            ChunkState::AwaitingAck,
            "on_ack called outside AwaitingAck"
        );
        if ack == self.seq {
            self.state = ChunkState::Delivered;
        } else {
            self.retry_or_abandon();
        }
        self.state
    }

    /// Process an ack-wait timeout: schedule a resend, or abandon the chunk
    /// once the attempt limit is reached.
    pub fn on_timeout(&mut self) -> ChunkState {
        debug_assert_eq!(
            self.state,
            ChunkState::AwaitingAck,
            "on_timeout called outside AwaitingAck"
        );
        self.retry_or_abandon();
        self.state
    }

    fn retry_or_abandon(&mut self) {
        self.state = if self.attempts >= self.max_attempts {
            ChunkState::Abandoned
        } else {
            ChunkState::AwaitingSend
        };
    }
}
