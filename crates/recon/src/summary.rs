use std::collections::BTreeSet;

use finanzas_core::{BankMovement, SystemPayment};

use crate::model::{AutoMatchResult, MatchSummary};

/// Compute counts and totals for a matching run.
pub fn summarize(
    result: &AutoMatchResult,
    bank: &[BankMovement],
    payments: &[SystemPayment],
) -> MatchSummary {
    let matched_bank: BTreeSet<i64> = result.pairs.iter().map(|p| p.bank_id).collect();
    let matched_payments: BTreeSet<&str> =
        result.pairs.iter().map(|p| p.payment_id.as_str()).collect();

    let matched_total = bank
        .iter()
        .filter(|m| matched_bank.contains(&m.id))
        .map(|m| m.signed_amount())
        .sum();

    MatchSummary {
        matched: result.pairs.len(),
        bank_unmatched: bank.iter().filter(|m| !matched_bank.contains(&m.id)).count(),
        payments_unmatched: payments
            .iter()
            .filter(|p| !matched_payments.contains(p.id.as_str()))
            .count(),
        matched_total,
    }
}
