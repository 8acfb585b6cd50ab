use serde::Serialize;

// ---------------------------------------------------------------------------
// Auto match output
// ---------------------------------------------------------------------------

/// One proposed pairing between a bank movement and a system payment.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    pub bank_id: i64,
    pub payment_id: String,
    /// |bank signed amount − payment signed amount|, in currency units.
    pub amount_diff: f64,
    /// |bank date − payment date|, in whole days.
    pub day_diff: i64,
}

/// Result of one `auto_match` invocation. Nothing persists across calls;
/// the caller decides what to do with the proposed pairs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AutoMatchResult {
    pub pairs: Vec<MatchedPair>,
}

impl AutoMatchResult {
    /// Number of matched pairs — the count the UI reports.
    pub fn matched_count(&self) -> usize {
        self.pairs.len()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counts and totals for one matching run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub bank_unmatched: usize,
    pub payments_unmatched: usize,
    /// Sum of matched bank signed amounts, in currency units.
    pub matched_total: f64,
}
