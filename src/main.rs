use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use cash_ledger::cli::{
    handle_audit_command, handle_count_command, handle_history_command, CountArgs,
    HistoryCommands,
};
use cash_ledger::config::{LedgerPaths, Settings};
use cash_ledger::models::Session;
use cash_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "cashledger",
    version,
    about = "Count cash by denomination and keep a dated history",
    long_about = "Cash Ledger counts notes per denomination as bundles of 100 plus \
                  loose notes, shows per-denomination and grand totals, and saves \
                  each count so it can be browsed later by date."
)]
struct Cli {
    /// User the records belong to (defaults to `default_owner` in config.json)
    #[arg(short, long, global = true, env = "CASH_LEDGER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count notes and save the result
    Count(CountArgs),

    /// Browse and manage saved counts
    #[command(subcommand)]
    History(HistoryCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    // `RUST_LOG` overrides the default; e.g. `RUST_LOG=cash_ledger=debug`
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(env_filter)
        .init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths)?;
    if !settings.audit_enabled {
        storage = storage.without_audit();
    }
    storage.load_all()?;

    let session = Session::from_user(cli.user.as_deref().or(settings.default_owner.as_deref()));

    match cli.command {
        Some(Commands::Count(args)) => {
            handle_count_command(&storage, &settings, &session, args)?;
        }
        Some(Commands::History(cmd)) => {
            handle_history_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            let paths = storage.paths();
            println!("Cash Ledger Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Records file:   {}", paths.records_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  Denominations:   {}",
                settings
                    .denominations
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!(
                "  Default user:    {}",
                settings.default_owner.as_deref().unwrap_or("(none)")
            );
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("Cash Ledger - count cash by denomination");
            println!();
            println!("Run 'cashledger --help' for usage information.");
            println!("Run 'cashledger count --bundle 500=2 --open 100=5' to count.");
        }
    }

    Ok(())
}
