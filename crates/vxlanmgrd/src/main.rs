//! vxlanmgrd - VXLAN Overlay Reconciliation Daemon
//!
//! Entry point for the vxlanmgrd daemon.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use vxlanmgrd::{VxlanMgr, ASIC_PROVIDER_MAJOR, ASIC_PROVIDER_MINOR, ASIC_PROVIDER_NAME};

#[derive(Parser, Debug)]
#[command(name = "vxlanmgrd", about = "VXLAN overlay reconciliation daemon")]
struct Args {
    /// ASIC capability provider to resolve from the plugin registry
    #[arg(long, default_value = ASIC_PROVIDER_NAME)]
    provider: String,

    /// Required provider interface major version
    #[arg(long, default_value_t = ASIC_PROVIDER_MAJOR)]
    provider_major: u32,

    /// Minimum provider interface minor version
    #[arg(long, default_value_t = ASIC_PROVIDER_MINOR)]
    provider_minor: u32,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

/// Initializes tracing/logging subsystem
fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    info!("--- Starting vxlanmgrd ---");

    let _mgr = VxlanMgr::with_provider_spec(&args.provider, args.provider_major, args.provider_minor);

    // The store-facing notification wiring attaches here and drives the
    // entry points; until it does, park and wait for shutdown.
    info!("vxlanmgrd initialized; awaiting reconfiguration events");

    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to wait for shutdown signal: {}", e);
            ExitCode::FAILURE
        }
    }
}
