//! CSV loading for offline commands.
//!
//! Accepts the column names the export screens produce. Required
//! columns are matched by header name; optional columns may be missing
//! entirely.

use chrono::NaiveDate;
use finanzas_core::{parse_iso_date, BankMovement, PayrollLine, PaymentKind, SystemPayment};

/// Header-indexed access over one CSV file.
struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn from_reader<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Self, String> {
        let headers = reader
            .headers()
            .map_err(|e| format!("cannot read headers: {e}"))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        Ok(Self { headers })
    }

    fn required(&self, name: &str) -> Result<usize, String> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format!("missing column '{name}'"))
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

fn opt_field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.map(|i| field(record, i)).unwrap_or("")
}

fn parse_amount(value: &str, row: usize, column: &str) -> Result<f64, String> {
    value
        .parse()
        .map_err(|_| format!("row {row}: cannot parse {column} '{value}'"))
}

fn parse_opt_amount(value: &str, row: usize, column: &str) -> Result<Option<f64>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_amount(value, row, column).map(Some)
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, String> {
    parse_iso_date(value).ok_or_else(|| format!("row {row}: cannot parse fecha '{value}'"))
}

fn opt_string(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Load a bank-movements export.
///
/// Required columns: `id, fecha, descripcion`. Optional:
/// `cargo, abono, saldo, referencia`.
pub fn load_bank_csv(data: &str) -> Result<Vec<BankMovement>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let cols = Columns::from_reader(&mut reader)?;

    let id_idx = cols.required("id")?;
    let fecha_idx = cols.required("fecha")?;
    let descripcion_idx = cols.required("descripcion")?;
    let cargo_idx = cols.optional("cargo");
    let abono_idx = cols.optional("abono");
    let saldo_idx = cols.optional("saldo");
    let referencia_idx = cols.optional("referencia");

    let mut movements = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 2; // 1-based, after the header line
        let record = record.map_err(|e| format!("row {row}: {e}"))?;

        let id_str = field(&record, id_idx);
        let id = id_str
            .parse()
            .map_err(|_| format!("row {row}: cannot parse id '{id_str}'"))?;

        movements.push(BankMovement {
            id,
            fecha: parse_date(field(&record, fecha_idx), row)?,
            descripcion: field(&record, descripcion_idx).to_string(),
            cargo: parse_opt_amount(opt_field(&record, cargo_idx), row, "cargo")?,
            abono: parse_opt_amount(opt_field(&record, abono_idx), row, "abono")?,
            saldo: parse_opt_amount(opt_field(&record, saldo_idx), row, "saldo")?,
            referencia: opt_string(opt_field(&record, referencia_idx)),
            procesado: false,
        });
    }
    Ok(movements)
}

/// Load a system-payments export.
///
/// Required columns: `id, fecha, numero, tipo, monto_total`. Optional:
/// `tercero_nombre, notas`.
pub fn load_payments_csv(data: &str) -> Result<Vec<SystemPayment>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let cols = Columns::from_reader(&mut reader)?;

    let id_idx = cols.required("id")?;
    let fecha_idx = cols.required("fecha")?;
    let numero_idx = cols.required("numero")?;
    let tipo_idx = cols.required("tipo")?;
    let monto_idx = cols.required("monto_total")?;
    let tercero_idx = cols.optional("tercero_nombre");
    let notas_idx = cols.optional("notas");

    let mut payments = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = record.map_err(|e| format!("row {row}: {e}"))?;

        let tipo = match field(&record, tipo_idx) {
            "ingreso" => PaymentKind::Ingreso,
            "egreso" => PaymentKind::Egreso,
            other => return Err(format!("row {row}: tipo must be ingreso or egreso, got '{other}'")),
        };

        payments.push(SystemPayment {
            id: field(&record, id_idx).to_string(),
            fecha: parse_date(field(&record, fecha_idx), row)?,
            numero: field(&record, numero_idx).to_string(),
            tipo,
            monto_total: parse_amount(field(&record, monto_idx), row, "monto_total")?,
            tercero_nombre: opt_string(opt_field(&record, tercero_idx)),
            notas: opt_string(opt_field(&record, notas_idx)),
            conciliado: false,
        });
    }
    Ok(payments)
}

/// Load a payroll roster.
///
/// Required columns: `empleado_id, empleado_nombre`. The numeric
/// columns default to zero when absent or empty.
pub fn load_payroll_csv(data: &str) -> Result<Vec<PayrollLine>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let cols = Columns::from_reader(&mut reader)?;

    let id_idx = cols.required("empleado_id")?;
    let nombre_idx = cols.required("empleado_nombre")?;
    let base_idx = cols.optional("salario_base");
    let bonif_idx = cols.optional("bonificaciones");
    let adel_idx = cols.optional("adelantos");
    let desc_idx = cols.optional("otros_descuentos");

    let mut lines = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = record.map_err(|e| format!("row {row}: {e}"))?;

        let id_str = field(&record, id_idx);
        let empleado_id = id_str
            .parse()
            .map_err(|_| format!("row {row}: cannot parse empleado_id '{id_str}'"))?;

        let zero_when_empty = |idx: Option<usize>, column: &str| -> Result<f64, String> {
            let value = opt_field(&record, idx);
            if value.is_empty() {
                Ok(0.0)
            } else {
                parse_amount(value, row, column)
            }
        };

        lines.push(PayrollLine {
            empleado_id,
            empleado_nombre: field(&record, nombre_idx).to_string(),
            salario_base: zero_when_empty(base_idx, "salario_base")?,
            bonificaciones: zero_when_empty(bonif_idx, "bonificaciones")?,
            adelantos: zero_when_empty(adel_idx, "adelantos")?,
            otros_descuentos: zero_when_empty(desc_idx, "otros_descuentos")?,
        });
    }
    Ok(lines)
}
