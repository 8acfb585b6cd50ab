//! `finanzas-payroll` — Net-pay derivation and roster totals.
//!
//! Plain IEEE-double arithmetic, matching the client the backend
//! reconciles against; the server remains the source of truth for
//! stored amounts.

use finanzas_core::PayrollLine;
use serde::Serialize;

/// Aggregate totals over a roster. Always recomputed from the lines,
/// never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PayrollTotals {
    /// Σ (salario_base + bonificaciones)
    pub bruto: f64,
    /// Σ adelantos
    pub adelantos: f64,
    /// Σ otros_descuentos
    pub descuentos: f64,
    /// Σ net pay; equals bruto − adelantos − descuentos.
    pub neto: f64,
}

/// Net pay for one line. May be negative — the screen shows it in red
/// but nothing blocks it.
pub fn compute_net(line: &PayrollLine) -> f64 {
    line.salario_base + line.bonificaciones - line.adelantos - line.otros_descuentos
}

/// Totals across a roster.
pub fn compute_totals(lines: &[PayrollLine]) -> PayrollTotals {
    let mut totals = PayrollTotals::default();
    for line in lines {
        totals.bruto += line.salario_base + line.bonificaciones;
        totals.adelantos += line.adelantos;
        totals.descuentos += line.otros_descuentos;
        totals.neto += compute_net(line);
    }
    totals
}

/// Lines eligible for submission. A line with zero base salary and zero
/// bonuses means the employee is not included this period and is dropped
/// before the payroll is sent to the backend.
pub fn submittable_lines(lines: &[PayrollLine]) -> Vec<PayrollLine> {
    lines
        .iter()
        .filter(|l| l.salario_base != 0.0 || l.bonificaciones != 0.0)
        .cloned()
        .collect()
}
