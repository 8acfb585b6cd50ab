//! `finanzas-recon` — Bank reconciliation engine.
//!
//! Pure engine crate: receives in-memory movement and payment lists,
//! proposes matches. Persistence belongs to the backend; the caller
//! commits accepted pairs through `finanzas-client` and re-fetches.

pub mod config;
pub mod error;
pub mod manual;
pub mod matcher;
pub mod model;
pub mod selection;
pub mod summary;

pub use config::ToleranceConfig;
pub use error::ReconError;
pub use manual::validate_manual_match;
pub use matcher::auto_match;
pub use model::{AutoMatchResult, MatchSummary, MatchedPair};
pub use selection::Selection;
pub use summary::summarize;
