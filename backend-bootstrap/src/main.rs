use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use backend_bootstrap::{run_scan, run_standalone, ScanOptions};

#[derive(Parser, Debug)]
#[command(name = "watchdog-backend")]
#[command(about = "Watchdog financial anomaly detection", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Run detection over an audit log file and print the report
    Scan {
        /// JSON or YAML audit log export
        file: PathBuf,
        /// Fail when any entry is rejected
        #[arg(long)]
        strict: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    if let Some(config) = args.config {
        std::env::set_var("WATCHDOG_CONFIG", config);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => run_standalone().await,
        Command::Scan { file, strict } => run_scan(&ScanOptions { file, strict }).await,
    }
}
