//! Backend API client — shared between desktop and CLI.
//!
//! This crate is the single source of truth for the backend wire
//! contract: unreconciled lists, reconcile commits, history, statement
//! import. No GUI concepts, no retries — failures surface once.

mod auth;
mod client;

pub use auth::{auth_file_path, delete_auth, load_auth, save_auth, AuthCredentials, AuthError};
pub use client::{ApiError, Client, ImportOutcome};
