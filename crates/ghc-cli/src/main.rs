//! # GHC Ledger CLI
//!
//! Drives the Green Hydrogen Credit ledger from the command line. Each
//! invocation opens the file-backed store, runs one operation and prints the
//! result as JSON on stdout. Logs go to stderr.
//!
//! ## Environment
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `GHC_DATA_FILE` | `./data/ghc-ledger.bin` | Storage file |
//! | `GHC_STORAGE_KEY` | `green-hydrogen-ledger-storage` | Snapshot key |
//! | `GHC_SEED_DEMO` | `false` | Start from the demo marketplace data |
//! | `GHC_ID_STRATEGY` | `uuid` | `uuid` or `monotonic` |
//! | `RUST_LOG` | `info` | Log filter |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ghc_ledger::{
    id_generator_for, BatchIdGenerator, BatchStatus, FileBackedKVStore, LedgerApi, LedgerConfig,
    LedgerDependencies, LedgerStore, MutationOutcome, NewBatch, SystemTimeSource,
};

const DEFAULT_DATA_FILE: &str = "./data/ghc-ledger.bin";

type CliLedger = LedgerStore<FileBackedKVStore, Box<dyn BatchIdGenerator>, SystemTimeSource>;

/// Green Hydrogen Credit ledger
#[derive(Parser, Debug)]
#[command(name = "ghc")]
#[command(about = "Register, certify and trade green hydrogen credit batches")]
struct Args {
    /// Fail when a mutation is rejected instead of reporting the outcome
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new batch as Pending
    Register {
        /// Producer wallet
        #[arg(long)]
        producer: String,
        /// Credit volume
        #[arg(long)]
        volume: f64,
        /// Energy source (Solar, Wind, ...)
        #[arg(long)]
        energy_source: String,
        /// Proof document reference
        #[arg(long, default_value = "")]
        proof: String,
    },
    /// Set a batch's status, and optionally its unit price
    Certify {
        batch_id: String,
        /// Unit price; keeps the current price when omitted
        #[arg(long)]
        price: Option<f64>,
        /// Target status
        #[arg(long, default_value = "Certified")]
        status: BatchStatus,
    },
    /// Reject a batch
    Reject { batch_id: String },
    /// Purchase a certified batch
    Purchase {
        batch_id: String,
        /// Buyer wallet
        #[arg(long)]
        buyer: String,
    },
    /// List batches, optionally filtered by status
    Batches {
        #[arg(long)]
        status: Option<BatchStatus>,
    },
    /// Batches registered by a producer
    Producer { wallet: String },
    /// Aggregates of a wallet
    Wallet { wallet: String },
    /// Ledger-wide totals
    Summary,
    /// Check wallet aggregates against the sold batches
    Audit,
    /// Drop all ledger state
    Reset,
}

/// Load configuration from the environment.
fn load_config() -> (PathBuf, LedgerConfig) {
    let mut config = LedgerConfig::default();

    let data_file = std::env::var("GHC_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

    if let Ok(key) = std::env::var("GHC_STORAGE_KEY") {
        if key.is_empty() {
            warn!("GHC_STORAGE_KEY is empty, keeping '{}'", config.storage_key);
        } else {
            config.storage_key = key;
        }
    }
    if let Ok(seed) = std::env::var("GHC_SEED_DEMO") {
        match seed.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => config.seed_demo_data = true,
            "0" | "false" | "no" | "" => config.seed_demo_data = false,
            other => warn!("Ignoring GHC_SEED_DEMO={}, expected true or false", other),
        }
    }
    if let Ok(strategy) = std::env::var("GHC_ID_STRATEGY") {
        match strategy.parse() {
            Ok(s) => config.id_strategy = s,
            Err(e) => warn!("Ignoring GHC_ID_STRATEGY: {}", e),
        }
    }

    (data_file, config)
}

fn open_ledger(data_file: &Path, config: LedgerConfig) -> Result<CliLedger> {
    let kv_store = FileBackedKVStore::open(data_file)
        .with_context(|| format!("Failed to open storage file {}", data_file.display()))?;
    let deps = LedgerDependencies {
        kv_store,
        id_generator: id_generator_for(config.id_strategy),
        time_source: SystemTimeSource,
    };
    LedgerStore::open(deps, config).context("Failed to load ledger")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", out);
    Ok(())
}

fn report(outcome: MutationOutcome, strict: bool) -> Result<()> {
    print_json(&outcome)?;
    if strict {
        outcome.into_result()?;
    }
    Ok(())
}

fn run(args: Args, ledger: &mut CliLedger) -> Result<()> {
    match args.command {
        Command::Register {
            producer,
            volume,
            energy_source,
            proof,
        } => {
            let batch =
                ledger.register_new_batch(NewBatch::new(producer, volume, energy_source, proof))?;
            print_json(&batch)
        }
        Command::Certify {
            batch_id,
            price,
            status,
        } => {
            let outcome = ledger.update_batch_status(&batch_id, status, price)?;
            report(outcome, args.strict)
        }
        Command::Reject { batch_id } => {
            let outcome = ledger.update_batch_status(&batch_id, BatchStatus::Rejected, None)?;
            report(outcome, args.strict)
        }
        Command::Purchase { batch_id, buyer } => {
            let outcome = ledger.purchase_batch(&batch_id, &buyer)?;
            report(outcome, args.strict)
        }
        Command::Batches { status } => match status {
            Some(status) => print_json(&ledger.get_batches_by_status(status)),
            None => print_json(ledger.batches()),
        },
        Command::Producer { wallet } => print_json(&ledger.get_batches_for_producer(&wallet)),
        Command::Wallet { wallet } => print_json(&ledger.get_user_data(&wallet)),
        Command::Summary => print_json(&ledger.summary()),
        Command::Audit => {
            let audit = ledger.audit();
            print_json(&audit)?;
            if args.strict && !audit.is_consistent() {
                anyhow::bail!("audit found {} inconsistency(ies)", audit.findings.len());
            }
            Ok(())
        }
        Command::Reset => {
            ledger.reset()?;
            print_json(&ledger.summary())
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration
    let (data_file, config) = load_config();
    info!(
        "Opening ledger at {} (key '{}', ids: {})",
        data_file.display(),
        config.storage_key,
        config.id_strategy
    );

    let mut ledger = open_ledger(&data_file, config)?;
    run(args, &mut ledger)
}
