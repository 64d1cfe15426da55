//! `udp-arq` — reliable single-file transfer over UDP with a selectable
//! ARQ discipline.
//!
//! # Architecture
//!
//! ```text
//!  ┌──────────────┐   seq:payload    ┌────────────────┐
//!  │ SenderEngine │─────────────────▶│ ReceiverEngine │
//!  └──────┬───────┘                  └───────┬────────┘
//!         │            ACKs                  │
//!         │◀─────────────────────────────────┘
//!         │
//!  ┌──────▼─────────────────────────────────┐
//!  │  ChunkSender / StopWaitReceiver /      │
//!  │  WindowReceiver  (pure state machines) │
//!  └──────┬─────────────────────────────────┘
//!         │ raw UDP datagrams
//!  ┌──────▼────┐
//!  │  Socket   │  (blocking wrapper around std UdpSocket)
//!  └───────────┘
//! ```
//!
//! Two disciplines are selectable per transfer:
//! - **stop-and-wait** — one packet in flight; each ack echoes the packet's
//!   sequence number.
//! - **window** — cumulative acks and a bounded reorder buffer on the
//!   receive side. The send side stays serialized one packet at a time; the
//!   window size bounds only the receiver's buffer.
//!
//! Each module has a single responsibility:
//! - [`frame`]     — wire format (data packets, acks, termination sentinel)
//! - [`sender`]    — per-chunk send/await/retry/abandon state machine
//! - [`receiver`]  — stop-and-wait inbound state
//! - [`window`]    — window-discipline inbound state, cumulative acks
//! - [`engine`]    — transfer drivers owning socket and byte stores
//! - [`store`]     — chunked file source and sequential sink
//! - [`config`]    — discipline selection and tunables
//! - [`simulator`] — lossy socket wrapper for deterministic tests
//! - [`socket`]    — blocking UDP socket abstraction

pub mod config;
pub mod engine;
pub mod frame;
pub mod receiver;
pub mod sender;
pub mod simulator;
pub mod socket;
pub mod store;
pub mod window;
