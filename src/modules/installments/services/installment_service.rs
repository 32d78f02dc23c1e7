use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{AppError, MinorUnits, Result};
use crate::modules::installments::{
    models::{InstallmentQuote, InstallmentSettings},
    repositories::TenantSettingsRepository,
    services::InstallmentPricer,
};

/// Tenant-aware installment pricing
///
/// Resolves the tenant's fee configuration and hands it to
/// [`InstallmentPricer`] explicitly.
#[derive(Clone)]
pub struct InstallmentService {
    settings_repo: Arc<dyn TenantSettingsRepository>,
}

impl InstallmentService {
    pub fn new(settings_repo: Arc<dyn TenantSettingsRepository>) -> Self {
        Self { settings_repo }
    }

    /// Installment settings for a tenant, defaulting to a single payment
    pub async fn settings_for(&self, tenant_id: &str) -> Result<InstallmentSettings> {
        match self.settings_repo.find_installment_settings(tenant_id).await? {
            Some(settings) => Ok(settings),
            None => {
                debug!(tenant_id, "No installment settings; using single-payment defaults");
                Ok(InstallmentSettings::default())
            }
        }
    }

    /// Quote one installment count for a tenant
    ///
    /// # Errors
    /// Validation error when `installment_count` is zero or above the
    /// tenant's configured maximum.
    pub async fn quote(
        &self,
        tenant_id: &str,
        amount: MinorUnits,
        installment_count: u32,
    ) -> Result<InstallmentQuote> {
        let settings = self.settings_for(tenant_id).await?;

        if installment_count == 0 {
            return Err(AppError::validation("Installment count must be at least 1"));
        }
        if installment_count > settings.max_installments {
            return Err(AppError::validation(format!(
                "Installment count {} exceeds the maximum of {}",
                installment_count, settings.max_installments
            )));
        }

        Ok(InstallmentPricer::quote(
            amount,
            installment_count,
            &settings.fee_table,
            settings.policy,
        ))
    }

    /// Every installment option the tenant offers for `amount`
    pub async fn options(&self, tenant_id: &str, amount: MinorUnits) -> Result<Vec<InstallmentQuote>> {
        let settings = self.settings_for(tenant_id).await?;

        let quotes = InstallmentPricer::quote_all(
            amount,
            settings.max_installments,
            &settings.fee_table,
            settings.policy,
        );

        info!(
            tenant_id,
            amount,
            options = quotes.len(),
            "Installment options computed"
        );

        Ok(quotes)
    }
}
