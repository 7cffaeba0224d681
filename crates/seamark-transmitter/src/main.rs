//! Seamark transmitter binary.
//!
//! Runs one authenticated transmission session against a modem endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Level 3 (combined filter frame) against a local modem chain
//! seamark-transmitter --level 3 --endpoint 127.0.0.1:2000
//!
//! # Deterministic session with a fixed seed, announcement written out
//! seamark-transmitter --level 5 --fixed-seed <64 hex chars> \
//!     --announce commitment.json
//! ```

mod tcp;
mod timing;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use seamark_core::{CommitmentAnnouncement, ProtocolSession, SessionConfig};
use seamark_crypto::{SEED_SIZE, Seed, SeedProvider};
use seamark_proto::SecurityLevel;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::tcp::TcpTransport;

/// Seamark AIS broadcast authentication transmitter
#[derive(Parser, Debug)]
#[command(name = "seamark-transmitter")]
#[command(about = "Seamark AIS broadcast authentication transmitter")]
#[command(version)]
struct Args {
    /// Security level (0-6)
    #[arg(short, long, default_value = "1")]
    level: u8,

    /// Modem endpoint receiving rendered frames
    #[arg(short, long, default_value = "127.0.0.1:2000")]
    endpoint: String,

    /// Passphrase for the PBKDF2-derived master seed
    #[arg(long, default_value = "M0ng00se")]
    passphrase: String,

    /// Fixed master seed as 64 hex characters (overrides the passphrase)
    #[arg(long)]
    fixed_seed: Option<String>,

    /// Station identity transmitted in every frame
    #[arg(long, default_value = "247320162")]
    mmsi: u32,

    /// Write the commitment announcement as JSON to this path
    #[arg(long)]
    announce: Option<PathBuf>,

    /// Append per-session timing measurements to timing_level_<n>.csv
    #[arg(long)]
    timing_log: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Commitment announcement as written to disk for verifier distribution.
#[derive(Serialize)]
struct AnnouncementDocument {
    /// Chain commitment, lowercase hex
    commitment: String,
    /// Session chain length
    chain_length: u32,
    /// Security level id
    level: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Seamark transmitter starting");

    let level = SecurityLevel::try_from(args.level)?;
    let seed_provider = seed_provider_from(&args)?;

    let mut config = SessionConfig::new(level, seed_provider);
    config.carrier.mmsi = args.mmsi;
    config.broadcast.mmsi = args.mmsi;

    let mut rng = rand::thread_rng();
    let mut session = ProtocolSession::new(config, &mut rng)?;

    // The commitment must reach verifiers before anything is transmitted.
    let announcement = session.announcement();
    tracing::info!(
        commitment = %announcement.commitment,
        chain_length = announcement.chain_length,
        level = %announcement.level,
        "distribute this commitment to verifiers before transmission"
    );
    if let Some(path) = &args.announce {
        write_announcement(path, &announcement)?;
        tracing::info!(path = %path.display(), "commitment announcement written");
    }

    let mut transport = TcpTransport::new(args.endpoint.clone());
    let started = Instant::now();
    let report = session.run(&mut transport)?;
    let elapsed = started.elapsed();

    tracing::info!(
        frames = report.frames_sent,
        elapsed_slots = report.elapsed_slots,
        disclosed_key = %report.disclosed_key,
        elapsed_us = elapsed.as_micros() as u64,
        "transmission complete"
    );

    if args.timing_log {
        let path =
            timing::append(std::path::Path::new("."), level, elapsed, report.frames_sent)?;
        tracing::debug!(path = %path.display(), "timing measurement appended");
    }

    Ok(())
}

fn seed_provider_from(args: &Args) -> Result<SeedProvider, Box<dyn std::error::Error>> {
    let Some(hex_seed) = &args.fixed_seed else {
        return Ok(SeedProvider::passphrase(args.passphrase.clone()));
    };
    let bytes = hex::decode(hex_seed)?;
    let bytes: [u8; SEED_SIZE] = bytes
        .try_into()
        .map_err(|_| format!("fixed seed must be {SEED_SIZE} bytes of hex"))?;
    Ok(SeedProvider::Fixed(Seed::new(bytes)))
}

fn write_announcement(
    path: &std::path::Path,
    announcement: &CommitmentAnnouncement,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = AnnouncementDocument {
        commitment: announcement.commitment.to_string(),
        chain_length: announcement.chain_length,
        level: announcement.level.id(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    Ok(())
}
