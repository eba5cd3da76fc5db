//! # ledger-node
//!
//! Replays a JSON-lines operation script against a fresh ledger.
//!
//! ```text
//! ledger-node [--snapshot] [SCRIPT]
//! ```
//!
//! Reads `SCRIPT` (or stdin when omitted), prints one JSON outcome per
//! operation to stdout and, with `--snapshot`, the final ledger state as one
//! more JSON line. Logs go to stderr.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from the environment
//! 2. Load and validate `LedgerConfig` from the environment
//! 3. Start the event logger on the bus
//! 4. Replay the script
//! 5. Stop the event logger and print the snapshot

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use ledger_runtime::{replay, EventLoggerHandler, LedgerConfig, ReplaySummary, SupplyChainLedger};
use ledger_telemetry::{init_logging, TelemetryConfig};
use shared_bus::EventFilter;

/// Parsed command line.
struct Args {
    script: Option<String>,
    snapshot: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Args> {
    let mut args = Args {
        script: None,
        snapshot: false,
    };
    for arg in argv {
        match arg.as_str() {
            "--snapshot" => args.snapshot = true,
            flag if flag.starts_with("--") => bail!("unknown flag {}", flag),
            path => {
                if args.script.replace(path.to_string()).is_some() {
                    bail!("only one script path may be given");
                }
            }
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let args = parse_args(std::env::args().skip(1))?;
    let config = LedgerConfig::from_env().context("Failed to load ledger configuration")?;
    let ledger = Arc::new(SupplyChainLedger::with_defaults(config)?);

    // Start the event logger before any operation commits.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let logger = EventLoggerHandler::new(ledger.subscribe(EventFilter::all()));
    let logger_task = tokio::spawn(logger.run(shutdown_rx));

    let replay_ledger = Arc::clone(&ledger);
    let script = args.script.clone();
    let summary = tokio::task::spawn_blocking(move || -> Result<ReplaySummary> {
        let stdout = io::stdout();
        match script {
            Some(path) => {
                let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
                replay(replay_ledger.as_ref(), BufReader::new(file), stdout.lock())
                    .with_context(|| format!("Replay of {} aborted", path))
            }
            None => replay(replay_ledger.as_ref(), io::stdin().lock(), stdout.lock())
                .context("Replay of stdin aborted"),
        }
    })
    .await
    .context("Replay task panicked")??;

    info!(
        executed = summary.executed,
        failed = summary.failed,
        "Replay finished"
    );

    if args.snapshot {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &ledger.snapshot()).context("Failed to write snapshot")?;
        writeln!(stdout)?;
    }

    if let Err(e) = shutdown_tx.send(true) {
        warn!("Failed to send shutdown signal: {}", e);
    }
    let handled = logger_task.await.context("Event logger panicked")?;
    info!(events = handled, "Shutdown complete");

    Ok(())
}
