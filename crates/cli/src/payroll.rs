//! `finz payroll` — payroll computation over a roster export.

use std::path::PathBuf;

use clap::Subcommand;
use finanzas_core::{format_currency, Payroll, PayrollLine};
use finanzas_payroll::{compute_net, compute_totals, submittable_lines};

use crate::exit_codes::EXIT_RECON_PARSE;
use crate::load::load_payroll_csv;
use crate::CliError;

#[derive(Subcommand)]
pub enum PayrollCommands {
    /// Compute per-line net pay and roster totals from a roster export
    #[command(after_help = "\
Accepts a CSV roster or a full payroll JSON export (periodo, estado,
lines). Negative net pay (advances above gross) is flagged but not
rejected; the backend stays the authority on whether to accept it.

Examples:
  finz payroll totals planilla.csv
  finz payroll totals planilla-2024-01.json
  finz payroll totals planilla.csv --json
  finz payroll totals planilla.csv --submittable")]
    Totals {
        /// Roster CSV (empleado_id, empleado_nombre, salario_base, ...)
        /// or payroll JSON export
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only count lines that would be submitted (drops employees
        /// with zero base salary and zero bonuses)
        #[arg(long)]
        submittable: bool,
    },
}

pub fn cmd_payroll(cmd: PayrollCommands) -> Result<(), CliError> {
    match cmd {
        PayrollCommands::Totals { file, json, submittable } => {
            cmd_payroll_totals(file, json, submittable)
        }
    }
}

fn parse_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RECON_PARSE, message: msg.into(), hint: None }
}

/// A `.json` roster is a full payroll export; anything else is a bare
/// CSV line list.
fn load_roster(data: &str, file: &PathBuf) -> Result<(Vec<PayrollLine>, Option<String>), String> {
    if file.extension().is_some_and(|ext| ext == "json") {
        let payroll = parse_payroll_json(data)?;
        let header = format!("planilla {} ({})", payroll.periodo, payroll.estado);
        Ok((payroll.lines, Some(header)))
    } else {
        Ok((load_payroll_csv(data)?, None))
    }
}

fn parse_payroll_json(data: &str) -> Result<Payroll, String> {
    serde_json::from_str(data).map_err(|e| format!("cannot parse payroll JSON: {e}"))
}

fn cmd_payroll_totals(file: PathBuf, json_output: bool, submittable: bool) -> Result<(), CliError> {
    let data = std::fs::read_to_string(&file)
        .map_err(|e| parse_err(format!("cannot read {}: {e}", file.display())))?;
    let (all_lines, header) = load_roster(&data, &file)
        .map_err(|e| parse_err(format!("{}: {e}", file.display())))?;
    if let Some(header) = &header {
        eprintln!("{header}");
    }

    let lines = if submittable {
        submittable_lines(&all_lines)
    } else {
        all_lines.clone()
    };
    let totals = compute_totals(&lines);

    if json_output {
        let rows: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| {
                serde_json::json!({
                    "empleado_id": l.empleado_id,
                    "empleado_nombre": l.empleado_nombre,
                    "neto": compute_net(l),
                })
            })
            .collect();
        let json = serde_json::json!({ "lines": rows, "totals": totals });
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return Ok(());
    }

    for line in &lines {
        let neto = compute_net(line);
        let flag = if neto < 0.0 { "  (!)" } else { "" };
        println!(
            "{:>6}  {:<28} {:>14}{flag}",
            line.empleado_id,
            line.empleado_nombre,
            format_currency(Some(neto)),
        );
    }
    println!(
        "bruto {}   adelantos {}   descuentos {}   neto {}",
        format_currency(Some(totals.bruto)),
        format_currency(Some(totals.adelantos)),
        format_currency(Some(totals.descuentos)),
        format_currency(Some(totals.neto)),
    );

    if submittable && lines.len() < all_lines.len() {
        eprintln!(
            "{} line(s) excluded (no base salary or bonus this period)",
            all_lines.len() - lines.len(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYROLL_JSON: &str = r#"{
        "periodo": "2024-01",
        "fecha_inicio": "2024-01-01",
        "fecha_fin": "2024-01-31",
        "estado": "borrador",
        "lines": [
            {"empleado_id": 7, "empleado_nombre": "Rosa Diaz", "salario_base": 2500.0},
            {"empleado_id": 8, "empleado_nombre": "Luis Paredes", "salario_base": 1800.0, "adelantos": 300.0}
        ]
    }"#;

    #[test]
    fn json_roster_carries_period_and_status() {
        let (lines, header) = load_roster(PAYROLL_JSON, &PathBuf::from("planilla.json")).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].adelantos, 300.0);
        assert_eq!(header.as_deref(), Some("planilla 2024-01 (borrador)"));
    }

    #[test]
    fn csv_roster_has_no_header() {
        let csv = "empleado_id,empleado_nombre,salario_base\n7,Rosa Diaz,2500.00\n";
        let (lines, header) = load_roster(csv, &PathBuf::from("planilla.csv")).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(header.is_none());
    }

    #[test]
    fn bad_payroll_json_is_an_error() {
        let err = load_roster("{\"periodo\": 1}", &PathBuf::from("planilla.json")).unwrap_err();
        assert!(err.contains("payroll JSON"));
    }
}
