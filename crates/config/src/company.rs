//! Active-company (tenant) context.
//!
//! Explicit object handed to whoever needs the active company id —
//! never a hidden global. The disk file under ~/.config/finanzas/ is a
//! convenience cache so the selection survives restarts; `reload`
//! re-reads it on demand.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The company the user is currently working in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCompany {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ruc: Option<String>,
}

/// Current-tenant state with a load-on-start / select / reload lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyContext {
    #[serde(default)]
    active: Option<ActiveCompany>,
}

impl CompanyContext {
    /// Path of the cached selection.
    pub fn cache_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finanzas");
        config_dir.join("company.json")
    }

    /// Load the cached selection; an absent or unreadable cache means
    /// no active company.
    pub fn load() -> Self {
        Self::load_from(&Self::cache_path())
    }

    pub(crate) fn load_from(path: &PathBuf) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    /// Re-read the cache, replacing in-memory state.
    pub fn reload(&mut self) {
        self.reload_from(&Self::cache_path());
    }

    pub(crate) fn reload_from(&mut self, path: &PathBuf) {
        *self = Self::load_from(path);
    }

    pub fn active(&self) -> Option<&ActiveCompany> {
        self.active.as_ref()
    }

    /// Active company id, if one is selected.
    pub fn active_id(&self) -> Option<i64> {
        self.active.as_ref().map(|c| c.id)
    }

    /// Select a company and persist the choice.
    pub fn select(&mut self, company: ActiveCompany) -> Result<(), String> {
        self.active = Some(company);
        self.save_to(&Self::cache_path())
    }

    /// Clear the selection and the cache.
    pub fn clear(&mut self) -> Result<(), String> {
        self.active = None;
        self.save_to(&Self::cache_path())
    }

    pub(crate) fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let ctx = CompanyContext::default();
        assert!(ctx.active().is_none());
        assert!(ctx.active_id().is_none());
    }

    #[test]
    fn roundtrip_through_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");

        let mut ctx = CompanyContext::default();
        ctx.active = Some(ActiveCompany {
            id: 4,
            nombre: "Comercial Andina SAC".into(),
            ruc: Some("20512345678".into()),
        });
        ctx.save_to(&path).unwrap();

        let loaded = CompanyContext::load_from(&path);
        assert_eq!(loaded.active_id(), Some(4));
        assert_eq!(loaded.active().unwrap().nombre, "Comercial Andina SAC");
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");

        let mut ctx = CompanyContext::default();
        ctx.active = Some(ActiveCompany { id: 1, nombre: "Vieja SAC".into(), ruc: None });
        ctx.save_to(&path).unwrap();

        // Another process switches company behind our back.
        let mut other = CompanyContext::default();
        other.active = Some(ActiveCompany { id: 9, nombre: "Nueva SAC".into(), ruc: None });
        other.save_to(&path).unwrap();

        assert_eq!(ctx.active_id(), Some(1));
        ctx.reload_from(&path);
        assert_eq!(ctx.active_id(), Some(9));

        // A cache deleted underneath us reloads to no selection.
        std::fs::remove_file(&path).unwrap();
        ctx.reload_from(&path);
        assert!(ctx.active().is_none());
    }

    #[test]
    fn missing_cache_means_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let ctx = CompanyContext::load_from(&path);
        assert!(ctx.active().is_none());
    }

    #[test]
    fn corrupt_cache_means_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        std::fs::write(&path, "][").unwrap();
        let ctx = CompanyContext::load_from(&path);
        assert!(ctx.active().is_none());
    }
}
