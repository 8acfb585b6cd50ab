//! `finz recon` — bank reconciliation commands.

use std::path::PathBuf;

use clap::Subcommand;
use finanzas_client::Client;
use finanzas_core::{format_currency, format_date, parse_iso_date, BankMovement, SystemPayment};
use finanzas_recon::{auto_match, summarize, validate_manual_match, Selection, ToleranceConfig};

use crate::exit_codes::{
    api_exit_code, EXIT_RECON_INVALID_CONFIG, EXIT_RECON_PARSE, EXIT_RECON_UNBALANCED,
    EXIT_RECON_UNMATCHED, EXIT_USAGE,
};
use crate::load::{load_bank_csv, load_payments_csv};
use crate::CliError;

#[derive(Subcommand)]
pub enum ReconCommands {
    /// Auto-match bank and payment CSV exports, entirely offline
    #[command(after_help = "\
Exit code 3 indicates unmatched items remain on either side after the
run. Matched pairs are only proposals; nothing is persisted.

Examples:
  finz recon auto --bank movimientos.csv --payments pagos.csv
  finz recon auto --bank mov.csv --payments pagos.csv --json
  finz recon auto --bank mov.csv --payments pagos.csv --tolerance 0.05 --window 5
  finz recon auto --bank mov.csv --payments pagos.csv --config recon.toml")]
    Auto {
        /// Bank movements CSV export
        #[arg(long)]
        bank: PathBuf,

        /// System payments CSV export
        #[arg(long)]
        payments: PathBuf,

        /// Output pairs as JSON to stdout instead of a table
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Tolerance TOML file (amount, date_window_days)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Amount tolerance override, in currency units
        #[arg(long)]
        tolerance: Option<f64>,

        /// Date window override, in days
        #[arg(long)]
        window: Option<i64>,
    },

    /// Fetch pending lists from the backend, match, and optionally commit
    #[command(after_help = "\
Without --apply this is a dry run: pairs are proposed and counted but
nothing is persisted. With --apply each pair is committed through the
backend and the screen should be re-fetched afterwards.

Examples:
  finz recon sync --account 7
  finz recon sync --account 7 --apply
  finz recon sync --account 7 --date-from 2024-01-01 --date-to 2024-01-31 --json")]
    Sync {
        /// Bank account id
        #[arg(long)]
        account: i64,

        /// Commit every proposed pair to the backend
        #[arg(long)]
        apply: bool,

        /// Only payments dated on or after (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,

        /// Only payments dated on or before (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,

        /// Output pairs as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Commit a hand-picked match after balance validation
    #[command(after_help = "\
Fails with exit code 4 when the selected sides do not balance. The
balance rule is fixed at one cent; --tolerance and settings overrides
only affect auto matching. Nothing is sent on failure.

Examples:
  finz recon manual --account 7 --bank-ids 101,102 --payment-ids a
  finz recon manual --account 7 --bank-ids 103 --payment-ids b,c")]
    Manual {
        /// Bank account id
        #[arg(long)]
        account: i64,

        /// Bank movement ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        bank_ids: Vec<i64>,

        /// System payment ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        payment_ids: Vec<String>,
    },

    /// List unreconciled items on both sides
    Pending {
        /// Bank account id
        #[arg(long)]
        account: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List committed reconciliations
    History {
        /// Bank account id
        #[arg(long)]
        account: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_recon(cmd: ReconCommands) -> Result<(), CliError> {
    match cmd {
        ReconCommands::Auto { bank, payments, json, output, config, tolerance, window } => {
            cmd_recon_auto(bank, payments, json, output, config, tolerance, window)
        }
        ReconCommands::Sync { account, apply, date_from, date_to, json } => {
            cmd_recon_sync(account, apply, date_from, date_to, json)
        }
        ReconCommands::Manual { account, bank_ids, payment_ids } => {
            cmd_recon_manual(account, bank_ids, payment_ids)
        }
        ReconCommands::Pending { account, json } => cmd_recon_pending(account, json),
        ReconCommands::History { account, json } => cmd_recon_history(account, json),
    }
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn api_err(err: finanzas_client::ApiError) -> CliError {
    CliError { code: api_exit_code(&err), message: err.to_string(), hint: None }
}

/// Resolve the effective tolerance: settings defaults, then the TOML
/// file, then per-flag overrides.
fn resolve_tolerance(
    config: Option<&PathBuf>,
    tolerance: Option<f64>,
    window: Option<i64>,
) -> Result<ToleranceConfig, CliError> {
    let settings = finanzas_config::Settings::load();
    let mut tol = ToleranceConfig {
        amount: settings.amount_tolerance,
        date_window_days: settings.date_window_days,
    };

    if let Some(path) = config {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, format!("cannot read config: {e}")))?;
        tol = ToleranceConfig::from_toml(&contents)
            .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))?;
    }

    if let Some(amount) = tolerance {
        tol.amount = amount;
    }
    if let Some(days) = window {
        tol.date_window_days = days;
    }

    tol.validate()
        .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))?;
    Ok(tol)
}

fn report_match_run(
    bank: &[BankMovement],
    payments: &[SystemPayment],
    tol: &ToleranceConfig,
    json_output: bool,
    output_file: Option<&PathBuf>,
) -> Result<finanzas_recon::AutoMatchResult, CliError> {
    let result = auto_match(bank, payments, tol);
    let summary = summarize(&result, bank, payments);

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| recon_err(crate::exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(crate::exit_codes::EXIT_ERROR, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    } else {
        for pair in &result.pairs {
            println!(
                "bank {:>6}  <->  payment {:<12} (diff {}, {} day(s))",
                pair.bank_id,
                pair.payment_id,
                format_currency(Some(pair.amount_diff)),
                pair.day_diff,
            );
        }
    }

    // Human summary to stderr
    eprintln!(
        "auto match: {} pair(s) — {} bank and {} payment item(s) still pending, matched total {}",
        summary.matched,
        summary.bank_unmatched,
        summary.payments_unmatched,
        format_currency(Some(summary.matched_total)),
    );

    Ok(result)
}

fn cmd_recon_auto(
    bank_path: PathBuf,
    payments_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    config: Option<PathBuf>,
    tolerance: Option<f64>,
    window: Option<i64>,
) -> Result<(), CliError> {
    let tol = resolve_tolerance(config.as_ref(), tolerance, window)?;

    let bank_data = std::fs::read_to_string(&bank_path)
        .map_err(|e| recon_err(EXIT_RECON_PARSE, format!("cannot read {}: {e}", bank_path.display())))?;
    let payments_data = std::fs::read_to_string(&payments_path).map_err(|e| {
        recon_err(EXIT_RECON_PARSE, format!("cannot read {}: {e}", payments_path.display()))
    })?;

    let bank = load_bank_csv(&bank_data)
        .map_err(|e| recon_err(EXIT_RECON_PARSE, format!("{}: {e}", bank_path.display())))?;
    let payments = load_payments_csv(&payments_data)
        .map_err(|e| recon_err(EXIT_RECON_PARSE, format!("{}: {e}", payments_path.display())))?;

    let result = report_match_run(&bank, &payments, &tol, json_output, output_file.as_ref())?;
    let summary = summarize(&result, &bank, &payments);

    if summary.bank_unmatched > 0 || summary.payments_unmatched > 0 {
        return Err(recon_err(EXIT_RECON_UNMATCHED, "unmatched items remain"));
    }
    Ok(())
}

fn parse_date_flag(value: Option<String>, flag: &str) -> Result<Option<chrono::NaiveDate>, CliError> {
    match value {
        None => Ok(None),
        Some(s) => parse_iso_date(&s)
            .map(Some)
            .ok_or_else(|| recon_err(EXIT_USAGE, format!("--{flag} expects YYYY-MM-DD, got '{s}'"))),
    }
}

fn cmd_recon_sync(
    account: i64,
    apply: bool,
    date_from: Option<String>,
    date_to: Option<String>,
    json_output: bool,
) -> Result<(), CliError> {
    let date_from = parse_date_flag(date_from, "date-from")?;
    let date_to = parse_date_flag(date_to, "date-to")?;
    let tol = resolve_tolerance(None, None, None)?;

    let client = Client::from_saved_auth().map_err(api_err)?;
    let bank = client.list_bank_movements(account).map_err(api_err)?;
    let payments = client.list_payments(account, date_from, date_to).map_err(api_err)?;

    let result = report_match_run(&bank, &payments, &tol, json_output, None)?;

    if apply {
        let committed = client.apply_auto_matches(&result).map_err(api_err)?;
        eprintln!("committed {committed} pair(s); re-fetch to see the updated pending lists");
    } else {
        eprintln!("dry run — pass --apply to commit the pairs");
    }

    let summary = summarize(&result, &bank, &payments);
    if summary.bank_unmatched > 0 || summary.payments_unmatched > 0 {
        return Err(recon_err(EXIT_RECON_UNMATCHED, "unmatched items remain"));
    }
    Ok(())
}

/// Manual validation always balances at one cent; the configurable
/// tolerance only widens the auto matcher.
fn manual_tolerance() -> ToleranceConfig {
    ToleranceConfig::default()
}

fn cmd_recon_manual(
    account: i64,
    bank_ids: Vec<i64>,
    payment_ids: Vec<String>,
) -> Result<(), CliError> {
    let tol = manual_tolerance();

    let client = Client::from_saved_auth().map_err(api_err)?;
    let bank = client.list_bank_movements(account).map_err(api_err)?;
    let payments = client.list_payments(account, None, None).map_err(api_err)?;

    let mut selection = Selection::new();
    for id in &bank_ids {
        selection.toggle_bank(*id);
    }
    for id in &payment_ids {
        selection.toggle_payment(id);
    }

    let (bank_sel, payment_sel) = selection.resolve(&bank, &payments);
    if bank_sel.len() != bank_ids.len() {
        return Err(recon_err(EXIT_USAGE, "some bank ids are not in the pending list"));
    }
    if payment_sel.len() != payment_ids.len() {
        return Err(recon_err(EXIT_USAGE, "some payment ids are not in the pending list"));
    }

    let request = validate_manual_match(&bank_sel, &payment_sel, &tol)
        .map_err(|e| recon_err(EXIT_RECON_UNBALANCED, e.to_string()))?;

    client.reconcile(&request).map_err(api_err)?;
    eprintln!(
        "reconciled {} bank movement(s) against {} payment(s)",
        request.bank_ids.len(),
        request.payment_ids.len(),
    );
    Ok(())
}

fn cmd_recon_pending(account: i64, json_output: bool) -> Result<(), CliError> {
    let client = Client::from_saved_auth().map_err(api_err)?;
    let bank = client.list_bank_movements(account).map_err(api_err)?;
    let payments = client.list_payments(account, None, None).map_err(api_err)?;

    if json_output {
        let json = serde_json::json!({ "bank": bank, "payments": payments });
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return Ok(());
    }

    println!("movimientos bancarios pendientes ({}):", bank.len());
    for m in &bank {
        println!(
            "  {:>6}  {}  {:>14}  {}",
            m.id,
            format_date(Some(m.fecha)),
            format_currency(Some(m.signed_amount())),
            m.descripcion,
        );
    }
    println!("pagos del sistema pendientes ({}):", payments.len());
    for p in &payments {
        println!(
            "  {:>6}  {}  {:>14}  {} {}",
            p.id,
            format_date(Some(p.fecha)),
            format_currency(Some(p.signed_amount())),
            p.numero,
            p.tercero_nombre.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn cmd_recon_history(account: i64, json_output: bool) -> Result<(), CliError> {
    let client = Client::from_saved_auth().map_err(api_err)?;
    let records = client.list_reconciliations(account).map_err(api_err)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&records).unwrap_or_default());
        return Ok(());
    }

    for r in &records {
        println!(
            "{:>6}  {}  {:>14}  {} mov / {} pago(s)",
            r.id,
            format_date(Some(r.fecha)),
            format_currency(Some(r.total)),
            r.bank_ids.len(),
            r.payment_ids.len(),
        );
    }
    eprintln!("{} reconciliation(s)", records.len());
    Ok(())
}
