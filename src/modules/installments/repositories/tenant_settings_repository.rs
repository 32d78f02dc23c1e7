use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};

use crate::core::Result;
use crate::modules::installments::models::{
    InstallmentFeeTable, InstallmentPolicy, InstallmentSettings,
};

/// Source of tenant installment configuration
#[async_trait]
pub trait TenantSettingsRepository: Send + Sync {
    /// Installment settings for a tenant, `None` when the tenant has no row
    async fn find_installment_settings(&self, tenant_id: &str)
        -> Result<Option<InstallmentSettings>>;
}

#[derive(Debug, FromRow)]
struct TenantSettingsRow {
    max_installments: u32,
    #[sqlx(json)]
    installment_fees: InstallmentFeeTable,
    fee_passed_to_buyer: bool,
}

impl From<TenantSettingsRow> for InstallmentSettings {
    fn from(row: TenantSettingsRow) -> Self {
        Self {
            max_installments: row.max_installments.max(1),
            fee_table: row.installment_fees,
            policy: InstallmentPolicy::from(row.fee_passed_to_buyer),
        }
    }
}

pub struct MySqlTenantSettingsRepository {
    pool: MySqlPool,
}

impl MySqlTenantSettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantSettingsRepository for MySqlTenantSettingsRepository {
    async fn find_installment_settings(
        &self,
        tenant_id: &str,
    ) -> Result<Option<InstallmentSettings>> {
        let row = sqlx::query_as::<_, TenantSettingsRow>(
            r#"
            SELECT max_installments, installment_fees, fee_passed_to_buyer
            FROM tenant_settings
            WHERE tenant_id = ?
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InstallmentSettings::from))
    }
}
