//! Backend HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Covers the
//! reconciliation flow: list unmatched sides → commit matches →
//! history, plus bank-statement Excel import.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use finanzas_core::{BankMovement, ReconcileRequest, ReconciliationRecord, SystemPayment};
use finanzas_recon::AutoMatchResult;

use crate::auth::{load_auth, AuthCredentials};

/// Backend API client (blocking).
#[derive(Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

/// Error type for backend operations.
#[derive(Debug)]
pub enum ApiError {
    /// No auth credentials configured
    NotAuthenticated,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// File I/O error
    Io(String),
    /// Server returned a validation error (4xx with message)
    Validation(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "Not authenticated — run `finz login` first"),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Io(msg) => write!(f, "I/O error: {}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result of a bank-statement Excel import.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ImportOutcome {
    pub imported: u64,
}

impl Client {
    /// Create a new client using saved auth credentials.
    pub fn from_saved_auth() -> Result<Self, ApiError> {
        let creds = load_auth().ok_or(ApiError::NotAuthenticated)?;
        Self::new(creds)
    }

    /// Create a new client with explicit credentials.
    pub fn new(creds: AuthCredentials) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("finz/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: creds.api_base,
            token: creds.token,
        })
    }

    /// Unprocessed bank movements for one account.
    pub fn list_bank_movements(&self, account_id: i64) -> Result<Vec<BankMovement>, ApiError> {
        let url = format!(
            "{}/api/movements-bank?account_id={}&unprocessed=true",
            self.api_base, account_id
        );
        let resp = self.get(&url)?;
        resp.json().map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Unreconciled system payments for one account, optionally bounded
    /// by date.
    pub fn list_payments(
        &self,
        account_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<SystemPayment>, ApiError> {
        let mut url = format!("{}/api/payments?account_id={}", self.api_base, account_id);
        if let Some(from) = date_from {
            url.push_str(&format!("&date_from={from}"));
        }
        if let Some(to) = date_to {
            url.push_str(&format!("&date_to={to}"));
        }
        let resp = self.get(&url)?;
        resp.json().map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Commit one reconciliation. The backend flips `procesado` /
    /// `conciliado`; the caller re-fetches afterwards.
    pub fn reconcile(&self, request: &ReconcileRequest) -> Result<(), ApiError> {
        let url = format!("{}/api/reconcile", self.api_base);
        let body = serde_json::to_value(request).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.post_json(&url, &body)?;
        Ok(())
    }

    /// Persist every pair an auto-match run proposed, one reconcile
    /// request per pair. Returns how many were committed; stops at the
    /// first failure so the caller can re-fetch and see what remains.
    pub fn apply_auto_matches(&self, result: &AutoMatchResult) -> Result<usize, ApiError> {
        let mut committed = 0;
        for pair in &result.pairs {
            self.reconcile(&ReconcileRequest {
                bank_ids: vec![pair.bank_id],
                payment_ids: vec![pair.payment_id.clone()],
            })?;
            committed += 1;
        }
        Ok(committed)
    }

    /// Historical reconciliations for one account.
    pub fn list_reconciliations(
        &self,
        account_id: i64,
    ) -> Result<Vec<ReconciliationRecord>, ApiError> {
        let url = format!("{}/api/reconciliations?account_id={}", self.api_base, account_id);
        let resp = self.get(&url)?;
        resp.json().map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Upload a bank-statement Excel file for server-side import.
    pub fn import_bank_excel(
        &self,
        path: &Path,
        account_id: i64,
        bank_code: &str,
    ) -> Result<ImportOutcome, ApiError> {
        let url = format!("{}/api/import-bank-excel", self.api_base);

        let form = reqwest::blocking::multipart::Form::new()
            .file("file", path)
            .map_err(|e| ApiError::Io(e.to_string()))?
            .text("account_id", account_id.to_string())
            .text("bank_code", bank_code.to_string());

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 422 || status == 400 {
                return Err(ApiError::Validation(body));
            }
            return Err(ApiError::Http(status, body));
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 422 || status == 400 {
                return Err(ApiError::Validation(body));
            }
            return Err(ApiError::Http(status, body));
        }

        Ok(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 422 || status == 400 {
                return Err(ApiError::Validation(body));
            }
            return Err(ApiError::Http(status, body));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> Client {
        Client::new(AuthCredentials::new("tok".into(), server.base_url())).unwrap()
    }

    #[test]
    fn list_bank_movements_parses_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/movements-bank")
                .query_param("account_id", "7")
                .query_param("unprocessed", "true")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(serde_json::json!([
                {
                    "id": 1,
                    "fecha": "2024-01-10",
                    "descripcion": "DEPOSITO EFECTIVO",
                    "abono": 500.0,
                    "procesado": false
                }
            ]));
        });

        let movements = client_for(&server).list_bank_movements(7).unwrap();
        mock.assert();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].id, 1);
        assert_eq!(movements[0].signed_amount(), 500.0);
    }

    #[test]
    fn list_payments_with_date_bounds() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/payments")
                .query_param("account_id", "7")
                .query_param("date_from", "2024-01-01")
                .query_param("date_to", "2024-01-31");
            then.status(200).json_body(serde_json::json!([
                {
                    "id": "a",
                    "fecha": "2024-01-12",
                    "numero": "PAG-001",
                    "tipo": "ingreso",
                    "monto_total": 500.0
                }
            ]));
        });

        let from = NaiveDate::from_ymd_opt(2024, 1, 1);
        let to = NaiveDate::from_ymd_opt(2024, 1, 31);
        let payments = client_for(&server).list_payments(7, from, to).unwrap();
        mock.assert();
        assert_eq!(payments[0].signed_amount(), 500.0);
    }

    #[test]
    fn reconcile_posts_ids() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/reconcile")
                .json_body(serde_json::json!({
                    "bank_ids": [1, 2],
                    "payment_ids": ["a"]
                }));
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let req = ReconcileRequest {
            bank_ids: vec![1, 2],
            payment_ids: vec!["a".into()],
        };
        client_for(&server).reconcile(&req).unwrap();
        mock.assert();
    }

    #[test]
    fn validation_error_surfaces_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/reconcile");
            then.status(422).body("los montos no cuadran");
        });

        let req = ReconcileRequest { bank_ids: vec![1], payment_ids: vec!["a".into()] };
        let err = client_for(&server).reconcile(&req).unwrap_err();
        match err {
            ApiError::Validation(msg) => assert_eq!(msg, "los montos no cuadran"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn server_error_is_http() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/reconciliations");
            then.status(500).body("boom");
        });

        let err = client_for(&server).list_reconciliations(1).unwrap_err();
        assert!(matches!(err, ApiError::Http(500, _)));
    }

    #[test]
    fn apply_auto_matches_commits_each_pair() {
        use finanzas_recon::{AutoMatchResult, MatchedPair};

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/reconcile");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let result = AutoMatchResult {
            pairs: vec![
                MatchedPair { bank_id: 1, payment_id: "a".into(), amount_diff: 0.0, day_diff: 0 },
                MatchedPair { bank_id: 2, payment_id: "b".into(), amount_diff: 0.0, day_diff: 1 },
            ],
        };

        let committed = client_for(&server).apply_auto_matches(&result).unwrap();
        assert_eq!(committed, 2);
        mock.assert_hits(2);
    }
}
