//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | recon            | Reconciliation-specific codes            |
//! | 40-49   | api              | Backend API codes                        |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use finanzas_client::ApiError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Recon (3-9)
// =============================================================================

/// Auto match left unmatched items on either side.
/// Like `diff(1)` exit 1, it means "there is something left to review."
pub const EXIT_RECON_UNMATCHED: u8 = 3;

/// Manual selection does not balance within tolerance.
pub const EXIT_RECON_UNBALANCED: u8 = 4;

/// Parse error reading input files (CSV rows, dates, amounts).
pub const EXIT_RECON_PARSE: u8 = 5;

/// Invalid tolerance config.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 6;

// =============================================================================
// API (40-49)
// =============================================================================

/// Not authenticated to the backend (no saved token).
pub const EXIT_API_NOT_AUTH: u8 = 40;

/// Network/HTTP error communicating with the backend.
pub const EXIT_API_NETWORK: u8 = 42;

/// Backend returned a validation error (bad request, unprocessable entity).
pub const EXIT_API_VALIDATION: u8 = 43;

/// Map an ApiError to its exit code.
pub fn api_exit_code(err: &ApiError) -> u8 {
    match err {
        ApiError::NotAuthenticated => EXIT_API_NOT_AUTH,
        ApiError::Validation(_) => EXIT_API_VALIDATION,
        ApiError::Network(_) | ApiError::Http(_, _) | ApiError::Parse(_) | ApiError::Io(_) => {
            EXIT_API_NETWORK
        }
    }
}
