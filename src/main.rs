//! Entry point for `udp-arq`.
//!
//! Parses CLI arguments and dispatches into either **send** or **recv**
//! mode. All actual protocol work is delegated to library modules; `main.rs`
//! owns only process setup (logging, argument parsing) and the final
//! summary lines.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use udp_arq::config::{Mode, TransferConfig};
use udp_arq::engine::{ReceiverEngine, SenderEngine};
use udp_arq::socket::Socket;
use udp_arq::store::{self, ChunkReader};

/// Reliable single-file transfer over UDP with selectable ARQ discipline.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    role: Role,
}

#[derive(Subcommand)]
enum Role {
    /// Send a file to a receiver.
    Send {
        /// File to send.
        file: PathBuf,
        /// Local address to bind.
        #[arg(short, long, default_value = "127.0.0.1:12987")]
        bind: String,
        /// Receiver address.
        #[arg(short, long, default_value = "localhost:5000")]
        peer: String,
        /// ARQ discipline: stop-and-wait (0) or window (1).
        #[arg(short, long, default_value = "stop-and-wait")]
        mode: Mode,
        /// Window parameter (window mode only).
        #[arg(short, long, default_value_t = 256)]
        window: usize,
        /// Maximum payload bytes per packet.
        #[arg(short, long, default_value_t = 500)]
        chunk: usize,
        /// Ack timeout per attempt, in milliseconds.
        #[arg(short, long, default_value_t = 1000)]
        timeout_ms: u64,
    },
    /// Receive a file from a sender.
    Recv {
        /// Destination file to write.
        file: PathBuf,
        /// Local address to bind.
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,
        /// ARQ discipline: stop-and-wait (0) or window (1).
        #[arg(short, long, default_value = "stop-and-wait")]
        mode: Mode,
        /// Window parameter (window mode only).
        #[arg(short, long, default_value_t = 256)]
        window: usize,
    },
}

fn main() -> ExitCode {
    // Initialise env_logger; set RUST_LOG to control verbosity.
    env_logger::init();

    let cli = Cli::parse();
    match run(cli.role) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(role: Role) -> Result<(), Box<dyn std::error::Error>> {
    match role {
        Role::Send {
            file,
            bind,
            peer,
            mode,
            window,
            chunk,
            timeout_ms,
        } => {
            let config = TransferConfig {
                mode,
                window_size: window,
                chunk_size: chunk,
                timeout: Duration::from_millis(timeout_ms),
                ..TransferConfig::default()
            };
            let socket = Socket::bind(bind.parse()?)?;
            let mut engine = SenderEngine::connect(socket, &peer, config)?;

            let size = store::file_size(&file)?;
            println!(
                "sending {} ({size} bytes) from {} to {peer} in {mode} mode",
                file.display(),
                engine.local_addr()
            );

            let mut source = ChunkReader::open(&file)?;
            let stats = engine.transfer(&mut source)?;
            println!("{stats}");
        }
        Role::Recv {
            file,
            bind,
            mode,
            window,
        } => {
            let config = TransferConfig {
                mode,
                window_size: window,
                ..TransferConfig::default()
            };
            let socket = Socket::bind(bind.parse()?)?;
            let mut engine = ReceiverEngine::new(socket, config);

            println!(
                "receiving into {} on {} in {mode} mode",
                file.display(),
                engine.local_addr()
            );

            let mut sink = store::create_sink(&file)?;
            let stats = engine.receive(&mut sink)?;
            println!("{stats}");
        }
    }
    Ok(())
}
