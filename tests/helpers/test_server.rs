// Test Server Helpers
//
// Builds the production router and middleware stack over in-memory stores.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use async_trait::async_trait;
use vitrine::config::ReportingConfig;
use vitrine::core::Result;
use vitrine::installments::{InstallmentService, InstallmentSettings, TenantSettingsRepository};
use vitrine::middleware::{hash_api_key, ApiKeyAuth, ApiKeyRecord, ApiKeyStore, RequestId};
use vitrine::modules;
use vitrine::reports::models::{AggregationWindow, OrderRecord, RevenueSplit, SaleRecord};
use vitrine::reports::{ReportRepository, ReportService};

pub const TEST_TENANT: &str = "tenant-test";
pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Default)]
pub struct InMemorySettings {
    settings: HashMap<String, InstallmentSettings>,
}

#[async_trait]
impl TenantSettingsRepository for InMemorySettings {
    async fn find_installment_settings(&self, tenant_id: &str) -> Result<Option<InstallmentSettings>> {
        Ok(self.settings.get(tenant_id).cloned())
    }
}

/// Records per tenant; fetches apply the window like the SQL queries do
#[derive(Default)]
pub struct InMemoryReports {
    orders: Vec<(String, OrderRecord)>,
    sales: Vec<(String, SaleRecord)>,
    splits: Vec<(String, RevenueSplit)>,
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn fetch_orders(&self, tenant_id: &str, window: &AggregationWindow) -> Result<Vec<OrderRecord>> {
        Ok(self
            .orders
            .iter()
            .filter(|(tenant, order)| tenant == tenant_id && window.contains(order.created_at))
            .map(|(_, order)| order.clone())
            .collect())
    }

    async fn fetch_sales(&self, tenant_id: &str, window: &AggregationWindow) -> Result<Vec<SaleRecord>> {
        Ok(self
            .sales
            .iter()
            .filter(|(tenant, sale)| tenant == tenant_id && window.contains(sale.created_at))
            .map(|(_, sale)| sale.clone())
            .collect())
    }

    async fn fetch_splits(&self, tenant_id: &str, window: &AggregationWindow) -> Result<Vec<RevenueSplit>> {
        Ok(self
            .splits
            .iter()
            .filter(|(tenant, split)| tenant == tenant_id && window.contains(split.created_at))
            .map(|(_, split)| split.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryApiKeys {
    keys: HashMap<String, ApiKeyRecord>,
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeys {
    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKeyRecord>> {
        Ok(self.keys.get(key_hash).cloned())
    }
}

/// Fixture data behind a test app
pub struct TestState {
    pub settings: InMemorySettings,
    pub reports: InMemoryReports,
    pub api_keys: InMemoryApiKeys,
}

impl TestState {
    /// State with `TEST_API_KEY` active for `TEST_TENANT`
    pub fn new() -> Self {
        Self {
            settings: InMemorySettings::default(),
            reports: InMemoryReports::default(),
            api_keys: InMemoryApiKeys::default(),
        }
        .with_api_key(TEST_API_KEY, TEST_TENANT, true)
    }

    pub fn with_api_key(mut self, key: &str, tenant_id: &str, is_active: bool) -> Self {
        self.api_keys.keys.insert(
            hash_api_key(key),
            ApiKeyRecord {
                id: format!("key-{}", key),
                tenant_id: tenant_id.to_string(),
                is_active,
            },
        );
        self
    }

    pub fn with_settings(mut self, tenant_id: &str, settings: InstallmentSettings) -> Self {
        self.settings.settings.insert(tenant_id.to_string(), settings);
        self
    }

    pub fn with_order(mut self, tenant_id: &str, order: OrderRecord) -> Self {
        self.reports.orders.push((tenant_id.to_string(), order));
        self
    }

    pub fn with_sale(mut self, tenant_id: &str, sale: SaleRecord) -> Self {
        self.reports.sales.push((tenant_id.to_string(), sale));
        self
    }

    pub fn with_split(mut self, tenant_id: &str, split: RevenueSplit) -> Self {
        self.reports.splits.push((tenant_id.to_string(), split));
        self
    }
}

/// Application with production routes and authentication over `state`
pub fn test_app(
    state: TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let installment_service = InstallmentService::new(Arc::new(state.settings));
    let report_service = ReportService::new(Arc::new(state.reports), ReportingConfig::default());
    let api_keys: Arc<dyn ApiKeyStore> = Arc::new(state.api_keys);

    App::new()
        .app_data(web::Data::new(installment_service))
        .app_data(web::Data::new(report_service))
        .wrap(ApiKeyAuth::new(api_keys))
        .wrap(RequestId)
        .configure(modules::configure)
}
