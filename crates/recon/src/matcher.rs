use finanzas_core::{BankMovement, SystemPayment};

use crate::config::ToleranceConfig;
use crate::model::{AutoMatchResult, MatchedPair};

/// Propose pairings between unreconciled bank movements and system
/// payments by amount + date window.
///
/// Greedy first-fit over the input order: for each bank movement the
/// first still-unused payment passing both gates wins, even when a
/// closer amount or date candidate appears later in the list. This is
/// deliberate — it keeps the matcher O(n·m), deterministic for a fixed
/// input order, and cheap to review in the pending tab. Do not replace
/// it with a best-fit or assignment solver; callers assert the
/// first-fit behavior.
///
/// Inputs are never mutated and no state survives the call.
pub fn auto_match(
    bank: &[BankMovement],
    payments: &[SystemPayment],
    tolerance: &ToleranceConfig,
) -> AutoMatchResult {
    let mut payment_used = vec![false; payments.len()];
    let mut pairs = Vec::new();

    // Each bank movement is visited once, so the bank-side exclusion
    // set is implied by the outer loop.
    for movement in bank {
        let bank_amount = movement.signed_amount();

        for (pi, payment) in payments.iter().enumerate() {
            if payment_used[pi] {
                continue;
            }

            let amount_diff = (bank_amount - payment.signed_amount()).abs();
            // Strict `<`: a difference of exactly the tolerance fails.
            if amount_diff >= tolerance.amount {
                continue;
            }

            let day_diff = (movement.fecha - payment.fecha).num_days().abs();
            if day_diff <= tolerance.date_window_days {
                payment_used[pi] = true;
                pairs.push(MatchedPair {
                    bank_id: movement.id,
                    payment_id: payment.id.clone(),
                    amount_diff,
                    day_diff,
                });
                break;
            }
        }
    }

    AutoMatchResult { pairs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finanzas_core::PaymentKind;

    fn movement(id: i64, abono: f64, cargo: f64, fecha: &str) -> BankMovement {
        BankMovement {
            id,
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            descripcion: format!("mov {id}"),
            cargo: if cargo != 0.0 { Some(cargo) } else { None },
            abono: if abono != 0.0 { Some(abono) } else { None },
            saldo: None,
            referencia: None,
            procesado: false,
        }
    }

    fn payment(id: &str, tipo: PaymentKind, monto: f64, fecha: &str) -> SystemPayment {
        SystemPayment {
            id: id.into(),
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            numero: format!("PAG-{id}"),
            tipo,
            monto_total: monto,
            tercero_nombre: None,
            notas: None,
            conciliado: false,
        }
    }

    #[test]
    fn deposit_matches_ingreso_within_window() {
        let bank = vec![movement(1, 500.0, 0.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Ingreso, 500.0, "2024-01-12")];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.pairs[0].bank_id, 1);
        assert_eq!(result.pairs[0].payment_id, "a");
        assert_eq!(result.pairs[0].day_diff, 2);
    }

    #[test]
    fn window_exceeded_no_match() {
        let bank = vec![movement(1, 500.0, 0.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Ingreso, 500.0, "2024-01-20")];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 0);
    }

    #[test]
    fn amount_tolerance_is_strict() {
        let tol = ToleranceConfig::default();

        // Exactly one cent apart: must NOT match.
        let bank = vec![movement(1, 100.01, 0.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Ingreso, 100.0, "2024-01-10")];
        assert_eq!(auto_match(&bank, &payments, &tol).matched_count(), 0);

        // 0.0099 apart: must match.
        let bank = vec![movement(1, 100.0099, 0.0, "2024-01-10")];
        assert_eq!(auto_match(&bank, &payments, &tol).matched_count(), 1);
    }

    #[test]
    fn date_boundary_inclusive() {
        let tol = ToleranceConfig::default();
        let payments = vec![payment("a", PaymentKind::Ingreso, 200.0, "2024-01-10")];

        // Exactly 3 days: matches.
        let bank = vec![movement(1, 200.0, 0.0, "2024-01-13")];
        assert_eq!(auto_match(&bank, &payments, &tol).matched_count(), 1);

        // 4 days: does not.
        let bank = vec![movement(1, 200.0, 0.0, "2024-01-14")];
        assert_eq!(auto_match(&bank, &payments, &tol).matched_count(), 0);
    }

    #[test]
    fn first_fit_not_best_fit() {
        // S1 (2 days away) appears before S2 (same day). First-fit must
        // pick S1 even though S2 is the closer date.
        let bank = vec![movement(1, 100.0, 0.0, "2024-01-10")];
        let payments = vec![
            payment("s1", PaymentKind::Ingreso, 100.0, "2024-01-12"),
            payment("s2", PaymentKind::Ingreso, 100.0, "2024-01-10"),
        ];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.pairs[0].payment_id, "s1");
    }

    #[test]
    fn exclusivity_within_one_run() {
        // Two identical movements, one payment: only one pair.
        let bank = vec![
            movement(1, 300.0, 0.0, "2024-01-10"),
            movement(2, 300.0, 0.0, "2024-01-10"),
        ];
        let payments = vec![payment("a", PaymentKind::Ingreso, 300.0, "2024-01-10")];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.pairs[0].bank_id, 1);

        // One movement, two identical payments: only the first is consumed.
        let bank = vec![movement(1, 300.0, 0.0, "2024-01-10")];
        let payments = vec![
            payment("a", PaymentKind::Ingreso, 300.0, "2024-01-10"),
            payment("b", PaymentKind::Ingreso, 300.0, "2024-01-10"),
        ];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.pairs[0].payment_id, "a");
    }

    #[test]
    fn egreso_matches_debit() {
        // A bank debit (cargo) pairs with an egreso of the same magnitude.
        let bank = vec![movement(1, 0.0, 750.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Egreso, 750.0, "2024-01-11")];
        let result = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn sign_mismatch_never_pairs() {
        // A 100 credit and a 100 egreso differ by 200, far over tolerance.
        let bank = vec![movement(1, 100.0, 0.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Egreso, 100.0, "2024-01-10")];
        assert_eq!(
            auto_match(&bank, &payments, &ToleranceConfig::default()).matched_count(),
            0
        );
    }

    #[test]
    fn inputs_untouched() {
        let bank = vec![movement(1, 500.0, 0.0, "2024-01-10")];
        let payments = vec![payment("a", PaymentKind::Ingreso, 500.0, "2024-01-10")];
        let _ = auto_match(&bank, &payments, &ToleranceConfig::default());
        assert!(!bank[0].procesado);
        assert!(!payments[0].conciliado);
    }
}
