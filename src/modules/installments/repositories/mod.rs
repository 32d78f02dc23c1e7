pub mod tenant_settings_repository;

pub use tenant_settings_repository::{MySqlTenantSettingsRepository, TenantSettingsRepository};
