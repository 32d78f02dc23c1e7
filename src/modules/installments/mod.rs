pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{InstallmentFeeTable, InstallmentPolicy, InstallmentQuote, InstallmentSettings};
pub use repositories::{MySqlTenantSettingsRepository, TenantSettingsRepository};
pub use services::{InstallmentPricer, InstallmentService};
