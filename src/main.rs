use std::{io, path::PathBuf, process};

use atm_ledger::{AtmConfig, AtmError, Processor, app::Terminal};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atm", version)]
#[command(
    about = "Interactive ATM backed by per-account text files",
    long_about = None
)]
struct Cli {
    /// TOML config file; stock settings are used when it does not exist
    #[arg(long, default_value = "atm.toml")]
    config: PathBuf,

    /// Directory holding `<id>.txt` account records
    #[arg(long)]
    accounts_dir: Option<PathBuf>,

    /// Directory holding `<id>_log.txt` transaction ledgers
    #[arg(long)]
    ledger_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default settings to a TOML file
    InitConfig {
        #[arg(default_value = "atm.toml")]
        path: PathBuf,
        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AtmError> {
    let mut config = AtmConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.accounts_dir {
        config.storage.accounts_dir = dir;
    }
    if let Some(dir) = cli.ledger_dir {
        config.storage.ledger_dir = dir;
    }

    init_tracing(&config.logging.level);

    if let Some(Command::InitConfig { path, force }) = cli.command {
        config.write_to(&path, force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let atm = Processor::from_config(&config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Terminal::new(stdin.lock(), stdout.lock()).run(&atm)
}

/// Logs go to stderr so they never interleave with the ATM screen on stdout.
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
