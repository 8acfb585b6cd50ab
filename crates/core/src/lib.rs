//! `finanzas-core` — Domain types shared across the workspace.
//!
//! Pure types crate: bank movements, system payments, payroll lines,
//! and the es-PE display formatting helpers. No IO dependencies.

pub mod format;
pub mod model;

pub use format::{format_currency, format_currency_with, format_date, parse_iso_date};
pub use model::{
    BankMovement, Payroll, PayrollLine, PayrollStatus, PaymentKind, ReconcileRequest,
    ReconciliationRecord, SystemPayment,
};
