//! `finanzas-config` — Local settings and the active-company context.

pub mod company;
pub mod settings;

pub use company::{ActiveCompany, CompanyContext};
pub use settings::Settings;
