use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bank side
// ---------------------------------------------------------------------------

/// A single row from an imported bank statement.
///
/// By business convention at most one of `cargo`/`abono` is non-zero per
/// movement; the convention is not enforced here and `signed_amount` is
/// well-defined either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankMovement {
    pub id: i64,
    pub fecha: NaiveDate,
    pub descripcion: String,
    /// Debit amount (money leaving the account).
    #[serde(default)]
    pub cargo: Option<f64>,
    /// Credit amount (money entering the account).
    #[serde(default)]
    pub abono: Option<f64>,
    /// Running balance as reported by the bank.
    #[serde(default)]
    pub saldo: Option<f64>,
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub procesado: bool,
}

impl BankMovement {
    /// Signed amount: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        self.abono.unwrap_or(0.0) - self.cargo.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// System side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Ingreso,
    Egreso,
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ingreso => write!(f, "ingreso"),
            Self::Egreso => write!(f, "egreso"),
        }
    }
}

/// A payment recorded in the system (treasury module), to be paired with
/// bank movements during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPayment {
    pub id: String,
    pub fecha: NaiveDate,
    pub numero: String,
    pub tipo: PaymentKind,
    /// Always positive; the sign comes from `tipo`.
    pub monto_total: f64,
    #[serde(default)]
    pub tercero_nombre: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub conciliado: bool,
}

impl SystemPayment {
    /// Signed amount: ingresos positive, egresos negative.
    pub fn signed_amount(&self) -> f64 {
        match self.tipo {
            PaymentKind::Ingreso => self.monto_total,
            PaymentKind::Egreso => -self.monto_total,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation wire types
// ---------------------------------------------------------------------------

/// Body for `POST /api/reconcile`: links one or more bank movements to one
/// or more system payments. The backend enforces the durable flip of
/// `procesado`/`conciliado`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub bank_ids: Vec<i64>,
    pub payment_ids: Vec<String>,
}

/// A committed reconciliation as returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    pub id: i64,
    pub fecha: NaiveDate,
    pub bank_ids: Vec<i64>,
    pub payment_ids: Vec<String>,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

/// One employee's row in a payroll run. Missing numeric fields
/// deserialize as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollLine {
    pub empleado_id: i64,
    pub empleado_nombre: String,
    #[serde(default)]
    pub salario_base: f64,
    #[serde(default)]
    pub bonificaciones: f64,
    #[serde(default)]
    pub adelantos: f64,
    #[serde(default)]
    pub otros_descuentos: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Borrador,
    Pagada,
    Anulada,
}

impl std::fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrador => write!(f, "borrador"),
            Self::Pagada => write!(f, "pagada"),
            Self::Anulada => write!(f, "anulada"),
        }
    }
}

/// A payroll run for a pay period. Totals are always recomputed from
/// `lines` (see `finanzas-payroll`), never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payroll {
    pub periodo: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub lines: Vec<PayrollLine>,
    pub estado: PayrollStatus,
}
