//! Credential storage.
//!
//! One login per machine: `auth.json` under the user config directory,
//! written owner-only on Unix. A missing or unreadable file simply means
//! there is no session.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A saved login: bearer token plus the API base it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub token: String,
    pub api_base: String,
    /// Shown in diagnostics only; the backend identifies the user by token.
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthCredentials {
    pub fn new(token: String, api_base: String) -> Self {
        Self { token, api_base, email: None }
    }
}

/// Credential-file failures.
#[derive(Debug)]
pub enum AuthError {
    /// No user config directory on this platform.
    NoConfigDir,
    Serialize(String),
    Io(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoConfigDir => write!(f, "no user config directory available"),
            AuthError::Serialize(msg) => write!(f, "cannot serialize credentials: {msg}"),
            AuthError::Io(msg) => write!(f, "credential file error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Where the credentials live, when a config directory exists.
pub fn auth_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("finanzas").join("auth.json"))
}

/// Read the saved session, if any.
pub fn load_auth() -> Option<AuthCredentials> {
    load_auth_from(&auth_file_path()?)
}

pub(crate) fn load_auth_from(path: &Path) -> Option<AuthCredentials> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Persist the session, replacing any previous one.
pub fn save_auth(creds: &AuthCredentials) -> Result<(), AuthError> {
    let path = auth_file_path().ok_or(AuthError::NoConfigDir)?;
    save_auth_to(&path, creds)
}

pub(crate) fn save_auth_to(path: &Path, creds: &AuthCredentials) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AuthError::Io(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(creds)
        .map_err(|e| AuthError::Serialize(e.to_string()))?;

    // The token is a secret: the file is created owner-only, never
    // written first and restricted after.
    let mut file = open_owner_only(path).map_err(|e| AuthError::Io(e.to_string()))?;
    file.write_all(json.as_bytes())
        .map_err(|e| AuthError::Io(e.to_string()))
}

#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Forget the saved session. Logging out without one is not an error.
pub fn delete_auth() -> Result<(), AuthError> {
    let Some(path) = auth_file_path() else {
        return Ok(());
    };
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuthError::Io(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        let mut creds = AuthCredentials::new("tok123".into(), "https://api.test".into());
        creds.email = Some("tesoreria@example.com".into());
        save_auth_to(&path, &creds).unwrap();

        let loaded = load_auth_from(&path).unwrap();
        assert_eq!(loaded.token, "tok123");
        assert_eq!(loaded.api_base, "https://api.test");
        assert_eq!(loaded.email.as_deref(), Some("tesoreria@example.com"));
    }

    #[test]
    fn save_replaces_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        save_auth_to(&path, &AuthCredentials::new("old".into(), "https://a".into())).unwrap();
        save_auth_to(&path, &AuthCredentials::new("new".into(), "https://b".into())).unwrap();

        let loaded = load_auth_from(&path).unwrap();
        assert_eq!(loaded.token, "new");
        assert_eq!(loaded.api_base, "https://b");
    }

    #[test]
    fn absent_or_corrupt_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_auth_from(&dir.path().join("none.json")).is_none());

        let path = dir.path().join("auth.json");
        std::fs::write(&path, "{oops").unwrap();
        assert!(load_auth_from(&path).is_none());
    }

    #[test]
    fn email_is_optional_on_the_wire() {
        let json = r#"{"token":"tok","api_base":"https://api.test"}"#;
        let parsed: AuthCredentials = serde_json::from_str(json).unwrap();
        assert!(parsed.email.is_none());
    }

    #[test]
    fn path_is_under_the_app_config_dir() {
        let path = auth_file_path().unwrap();
        assert!(path.ends_with("finanzas/auth.json"));
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        save_auth_to(&path, &AuthCredentials::new("tok".into(), "https://api.test".into()))
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
