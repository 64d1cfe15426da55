//! Transfer drivers: the loops that own the socket and the byte stores.
//!
//! [`SenderEngine`] pulls chunks from a [`ChunkReader`], frames them, and
//! runs each through the [`ChunkSender`] send/await/retry cycle.
//! [`ReceiverEngine`] blocks on the socket, decodes, feeds the
//! discipline-specific inbound state, writes ordered payload to the sink,
//! and sends acknowledgments — until the termination sentinel arrives.
//!
//! Each engine exclusively owns its socket and its end of the byte store.
//! Fatal conditions are file I/O failures and unresolvable destinations;
//! ack timeouts and malformed datagrams are handled inside the loops and
//! never surface to the caller.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::config::{Mode, TransferConfig};
use crate::frame::{self, FrameError};
use crate::receiver::StopWaitReceiver;
use crate::sender::{ChunkSender, ChunkState};
use crate::socket::{resolve, Socket, SocketError};
use crate::store::ChunkReader;
use crate::window::{Inbound, WindowReceiver};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Fatal transfer failures.
#[derive(Debug)]
pub enum TransferError {
    /// The source could not be read or the sink could not be written.
    Io(std::io::Error),
    /// The destination address did not resolve; nothing was sent.
    Addr(std::io::Error),
    /// Transport failure other than an ack timeout.
    Socket(SocketError),
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "file I/O failed: {e}"),
            Self::Addr(e) => write!(f, "destination unresolvable: {e}"),
            Self::Socket(e) => write!(f, "transport failed: {e}"),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<SocketError> for TransferError {
    fn from(e: SocketError) -> Self {
        Self::Socket(e)
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Final accounting for one outbound transfer.
#[derive(Debug, Default)]
pub struct TransferStats {
    /// Sequence count reached (delivered + abandoned chunks).
    pub packets: u32,
    /// Data datagrams transmitted, retransmissions included (the
    /// termination sentinel is not counted).
    pub datagrams: u64,
    /// Payload bytes confirmed by a matching acknowledgment.
    pub bytes_delivered: u64,
    /// Chunks abandoned after the attempt limit. Accepted loss, not failure.
    pub abandoned: u32,
    /// Wall-clock duration of the transfer.
    pub elapsed: Duration,
}

impl std::fmt::Display for TransferStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sent {} packets ({} datagrams, {} bytes delivered, {} abandoned) in {:.2}s",
            self.packets,
            self.datagrams,
            self.bytes_delivered,
            self.abandoned,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Final accounting for one inbound transfer.
#[derive(Debug, Default)]
pub struct ReceiveStats {
    /// Data packets accepted and written.
    pub packets: u64,
    /// Payload bytes written to the sink.
    pub bytes_written: u64,
    /// Acknowledgments sent, gap re-acks included.
    pub acks: u64,
}

impl std::fmt::Display for ReceiveStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "received {} packets ({} bytes written, {} acks sent)",
            self.packets, self.bytes_written, self.acks
        )
    }
}

// ---------------------------------------------------------------------------
// SenderEngine
// ---------------------------------------------------------------------------

/// Drives one outbound file transfer.
pub struct SenderEngine {
    socket: Socket,
    peer: SocketAddr,
    config: TransferConfig,
}

impl SenderEngine {
    /// Build an engine targeting an already-resolved peer address.
    pub fn new(socket: Socket, peer: SocketAddr, config: TransferConfig) -> Self {
        Self {
            socket,
            peer,
            config,
        }
    }

    /// Build an engine from a `host:port` destination string.
    ///
    /// Fails with [`TransferError::Addr`] before any packet is sent.
    pub fn connect(
        socket: Socket,
        dest: &str,
        config: TransferConfig,
    ) -> Result<Self, TransferError> {
        let peer = resolve(dest).map_err(TransferError::Addr)?;
        Ok(Self::new(socket, peer, config))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.socket.local_addr
    }

    /// Send the whole source, chunk by chunk, then the termination sentinel.
    ///
    /// Chunks that exhaust their attempt limit are abandoned and the
    /// transfer continues; abandonment shows up only in the returned
    /// statistics. The sentinel is sent exactly once, with no retry and no
    /// wait for a response.
    pub fn transfer<R: Read>(
        &mut self,
        source: &mut ChunkReader<R>,
    ) -> Result<TransferStats, TransferError> {
        let start = Instant::now();
        let mut stats = TransferStats::default();
        let mut seq: u32 = 0;

        loop {
            let chunk = source
                .read_chunk(self.config.chunk_size)
                .map_err(TransferError::Io)?;
            if chunk.is_empty() {
                self.socket.send_to(frame::TERMINATION, self.peer)?;
                log::info!("[send] → end-of-stream sentinel");
                break;
            }

            match self.send_chunk(seq, &chunk, &mut stats)? {
                ChunkState::Delivered => stats.bytes_delivered += chunk.len() as u64,
                ChunkState::Abandoned => {
                    stats.abandoned += 1;
                    log::warn!(
                        "[send] abandoning packet {seq} after {} attempts",
                        self.config.max_attempts
                    );
                }
                _ => unreachable!("send_chunk returns a terminal state"),
            }

            seq = seq.wrapping_add(1);
            stats.packets = stats.packets.wrapping_add(1);
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }

    /// Run one chunk through the send/await/retry cycle to a terminal state.
    fn send_chunk(
        &mut self,
        seq: u32,
        chunk: &[u8],
        stats: &mut TransferStats,
    ) -> Result<ChunkState, TransferError> {
        let framed = frame::encode_data(seq, chunk);
        let mut state = ChunkSender::with_limit(seq, self.config.max_attempts);

        while !state.is_terminal() {
            match state.state() {
                ChunkState::AwaitingSend => {
                    if state.is_retry() {
                        log::info!("[send] resending packet {seq} (attempt {})", state.attempts + 1);
                    }
                    self.socket.send_to(&framed, self.peer)?;
                    stats.datagrams += 1;
                    state.on_sent();
                    log::info!("[send] → DATA seq={seq} len={}", chunk.len());
                }
                ChunkState::AwaitingAck => {
                    match self.socket.recv_from(Some(self.config.timeout)) {
                        Ok((bytes, from)) => match frame::decode_ack(&bytes) {
                            Ok(ack) => {
                                log::debug!("[send] ← ACK ack={ack} from {from}");
                                state.on_ack(ack);
                            }
                            Err(e) => {
                                // Malformed datagram: discard, keep waiting.
                                log::warn!("[send] discarding malformed ack: {e}");
                            }
                        },
                        Err(SocketError::Timeout) => {
                            log::warn!("[send] timeout waiting for ack {seq}");
                            state.on_timeout();
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                ChunkState::Delivered | ChunkState::Abandoned => unreachable!(),
            }
        }

        Ok(state.state())
    }
}

// ---------------------------------------------------------------------------
// ReceiverEngine
// ---------------------------------------------------------------------------

/// Drives one inbound file transfer.
pub struct ReceiverEngine {
    socket: Socket,
    config: TransferConfig,
}

impl ReceiverEngine {
    pub fn new(socket: Socket, config: TransferConfig) -> Self {
        Self { socket, config }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.socket.local_addr
    }

    /// Receive datagrams until the termination sentinel, writing ordered
    /// payload to `sink`.
    ///
    /// The receive wait has no timeout: a vanished sender blocks this call
    /// forever. Malformed datagrams are logged and discarded without an
    /// acknowledgment.
    pub fn receive<W: Write>(&mut self, sink: &mut W) -> Result<ReceiveStats, TransferError> {
        log::info!("[recv] mode: {}", self.config.mode);
        let stats = match self.config.mode {
            Mode::StopAndWait => self.receive_stop_wait(sink)?,
            Mode::Window => self.receive_window(sink)?,
        };
        sink.flush().map_err(TransferError::Io)?;
        log::info!("[recv] transfer complete: {stats}");
        Ok(stats)
    }

    fn receive_stop_wait<W: Write>(
        &mut self,
        sink: &mut W,
    ) -> Result<ReceiveStats, TransferError> {
        let mut state = StopWaitReceiver::new();
        let mut stats = ReceiveStats::default();

        loop {
            let (bytes, from) = self.socket.recv_from(None)?;
            if frame::is_termination(&bytes) {
                log::info!("[recv] ← end-of-stream sentinel");
                break;
            }
            match frame::decode_data(&bytes) {
                Ok((seq, payload)) => {
                    let ack = state.on_packet(seq, &payload);
                    sink.write_all(&payload).map_err(TransferError::Io)?;
                    stats.packets += 1;
                    stats.bytes_written += payload.len() as u64;
                    self.send_ack(ack, from, &mut stats)?;
                }
                Err(e) => self.discard(&e),
            }
        }

        Ok(stats)
    }

    fn receive_window<W: Write>(&mut self, sink: &mut W) -> Result<ReceiveStats, TransferError> {
        let mut state = WindowReceiver::new(self.config.window_size);
        let mut stats = ReceiveStats::default();

        loop {
            let (bytes, from) = self.socket.recv_from(None)?;
            if frame::is_termination(&bytes) {
                // Any undelivered gap data still buffered is dropped here.
                log::info!("[recv] ← end-of-stream sentinel");
                break;
            }
            match frame::decode_data(&bytes) {
                Ok((seq, payload)) => match state.on_packet(seq, payload) {
                    Inbound::Deliver { payloads, ack } => {
                        for payload in payloads {
                            sink.write_all(&payload).map_err(TransferError::Io)?;
                            stats.packets += 1;
                            stats.bytes_written += payload.len() as u64;
                        }
                        self.send_ack(ack, from, &mut stats)?;
                    }
                    Inbound::Gap { ack } => {
                        log::debug!("[recv] gap: got seq={seq}, expected {}", state.expected);
                        self.send_ack(ack, from, &mut stats)?;
                    }
                },
                Err(e) => self.discard(&e),
            }
        }

        Ok(stats)
    }

    fn send_ack(
        &self,
        ack: u32,
        to: SocketAddr,
        stats: &mut ReceiveStats,
    ) -> Result<(), TransferError> {
        self.socket.send_to(&frame::encode_ack(ack), to)?;
        stats.acks += 1;
        log::info!("[recv] → ACK ack={ack} to {to}");
        Ok(())
    }

    fn discard(&self, e: &FrameError) {
        log::warn!("[recv] discarding malformed datagram: {e}");
    }
}
