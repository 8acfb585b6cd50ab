use finanzas_core::{BankMovement, ReconcileRequest, SystemPayment};

use crate::config::ToleranceConfig;
use crate::error::ReconError;

/// Validate a user-selected manual match and build the persistence
/// request.
///
/// All-or-nothing over the current selection: both sides must be
/// non-empty and their signed totals must agree within the amount
/// tolerance (inclusive — a residual of exactly the tolerance passes).
/// On failure nothing is sent; the caller surfaces the error and leaves
/// the selection untouched.
pub fn validate_manual_match(
    bank_selected: &[&BankMovement],
    payments_selected: &[&SystemPayment],
    tolerance: &ToleranceConfig,
) -> Result<ReconcileRequest, ReconError> {
    if bank_selected.is_empty() {
        return Err(ReconError::EmptySelection { side: "bank" });
    }
    if payments_selected.is_empty() {
        return Err(ReconError::EmptySelection { side: "system" });
    }

    let bank_total: f64 = bank_selected.iter().map(|m| m.signed_amount()).sum();
    let system_total: f64 = payments_selected.iter().map(|p| p.signed_amount()).sum();

    if (bank_total - system_total).abs() > tolerance.amount {
        return Err(ReconError::Unbalanced {
            bank_total,
            system_total,
        });
    }

    Ok(ReconcileRequest {
        bank_ids: bank_selected.iter().map(|m| m.id).collect(),
        payment_ids: payments_selected.iter().map(|p| p.id.clone()).collect(),
    })
}
