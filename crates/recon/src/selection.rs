use std::collections::BTreeSet;

use finanzas_core::{BankMovement, SystemPayment};

/// Toggle-selection state for the reconciliation screen: one set per
/// side, clicking a row toggles membership. UI state only — nothing
/// here touches the backend.
///
/// Sets are ordered so the resulting request ids are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    bank: BTreeSet<i64>,
    payments: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a bank movement; returns whether it is selected afterwards.
    pub fn toggle_bank(&mut self, id: i64) -> bool {
        if !self.bank.remove(&id) {
            self.bank.insert(id);
            return true;
        }
        false
    }

    /// Toggle a system payment; returns whether it is selected afterwards.
    pub fn toggle_payment(&mut self, id: &str) -> bool {
        if !self.payments.remove(id) {
            self.payments.insert(id.to_string());
            return true;
        }
        false
    }

    /// The "conciliar" action is enabled only when both sides have at
    /// least one selected item.
    pub fn can_reconcile(&self) -> bool {
        !self.bank.is_empty() && !self.payments.is_empty()
    }

    /// Reset both sides — called after a successful commit or a reload.
    pub fn clear(&mut self) {
        self.bank.clear();
        self.payments.clear();
    }

    pub fn bank_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.bank.iter().copied()
    }

    pub fn payment_ids(&self) -> impl Iterator<Item = &str> {
        self.payments.iter().map(String::as_str)
    }

    /// Resolve the selected rows against the loaded lists. Ids that no
    /// longer resolve (stale after a reload) are silently dropped.
    pub fn resolve<'a>(
        &self,
        bank: &'a [BankMovement],
        payments: &'a [SystemPayment],
    ) -> (Vec<&'a BankMovement>, Vec<&'a SystemPayment>) {
        let bank_sel = bank.iter().filter(|m| self.bank.contains(&m.id)).collect();
        let payment_sel = payments
            .iter()
            .filter(|p| self.payments.contains(&p.id))
            .collect();
        (bank_sel, payment_sel)
    }
}
