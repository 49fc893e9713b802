//! Count CLI command
//!
//! Fills a ledger from `DENOMINATION=COUNT` pairs, prints the table, and
//! saves it as a record.

use clap::Args;

use crate::config::Settings;
use crate::display::format_ledger;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{CountField, Session};
use crate::services::LedgerService;
use crate::storage::Storage;

/// Arguments for `count`
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Bundles of 100 notes, as DENOMINATION=COUNT (repeatable, e.g. 500=-1)
    #[arg(short, long, value_name = "D=N", allow_hyphen_values = true)]
    pub bundle: Vec<String>,

    /// Loose notes, as DENOMINATION=COUNT (repeatable, e.g. 100=5)
    #[arg(short, long, value_name = "D=N", allow_hyphen_values = true)]
    pub open: Vec<String>,

    /// Note to attach to the record
    #[arg(short, long)]
    pub note: Option<String>,

    /// Print the table without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Split `D=N` into a face value and the raw count text
///
/// The count text is returned untouched; the ledger decides whether it is a
/// number.
pub fn parse_assignment(arg: &str) -> LedgerResult<(u32, &str)> {
    let (denomination, count) = arg.split_once('=').ok_or_else(|| {
        LedgerError::Validation(format!(
            "Expected DENOMINATION=COUNT, got '{}'",
            arg
        ))
    })?;

    let denomination = denomination.trim().parse::<u32>().map_err(|_| {
        LedgerError::Validation(format!("Invalid denomination: '{}'", denomination))
    })?;

    Ok((denomination, count))
}

/// Build a ledger from the command-line pairs
pub fn build_ledger(settings: &Settings, args: &CountArgs) -> LedgerResult<Ledger> {
    let mut ledger = Ledger::new(&settings.denominations);

    let pairs = args
        .bundle
        .iter()
        .map(|a| (CountField::Bundle, a))
        .chain(args.open.iter().map(|a| (CountField::Open, a)));

    for (field, arg) in pairs {
        let (denomination, text) = parse_assignment(arg)?;
        ledger.update_denomination(denomination, field, text)?;
    }

    Ok(ledger)
}

/// Handle the count command
pub fn handle_count_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    args: CountArgs,
) -> LedgerResult<()> {
    let ledger = build_ledger(settings, &args)?;
    print!("{}", format_ledger(&ledger, &settings.currency_symbol));

    if args.dry_run {
        return Ok(());
    }

    // Offsetting rows that net to nothing are not saved
    let lines = ledger.validate_and_parse()?;
    if !lines.is_empty() && ledger.is_zero_total() {
        return Err(LedgerError::Validation(
            "Grand total is zero; nothing to save".into(),
        ));
    }

    let service = LedgerService::from_storage(storage);
    let record = service.submit(session, &ledger, args.note.as_deref())?;
    println!(
        "Saved {} at {}",
        record.id,
        record.timestamp.as_deref().unwrap_or("-")
    );

    Ok(())
}
