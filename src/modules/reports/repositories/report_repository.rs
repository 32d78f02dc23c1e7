use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::core::Result;
use crate::modules::reports::models::{
    AggregationWindow, OrderRecord, RevenueSplit, SaleRecord,
};

/// Raw records behind the split report
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Orders created by the tenant inside the window
    async fn fetch_orders(&self, tenant_id: &str, window: &AggregationWindow)
        -> Result<Vec<OrderRecord>>;

    /// Sales recorded for the tenant inside the window
    async fn fetch_sales(&self, tenant_id: &str, window: &AggregationWindow)
        -> Result<Vec<SaleRecord>>;

    /// Revenue splits recorded for the tenant inside the window
    async fn fetch_splits(&self, tenant_id: &str, window: &AggregationWindow)
        -> Result<Vec<RevenueSplit>>;
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    total_amount: i64,
    payment_method: String,
    status: String,
    source: String,
    created_at: DateTime<Utc>,
    sale_id: Option<String>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            total_amount: row.total_amount,
            payment_method: row.payment_method.into(),
            status: row.status.into(),
            source: row.source.into(),
            created_at: row.created_at,
            sale_id: row.sale_id,
        }
    }
}

#[derive(Debug, FromRow)]
struct SaleRow {
    id: String,
    total_amount: i64,
    subtotal_amount: i64,
    payment_method: String,
    installment_count: u32,
    gateway_transaction_id: Option<String>,
    gateway_fee: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<SaleRow> for SaleRecord {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            total_amount: row.total_amount,
            subtotal_amount: row.subtotal_amount,
            payment_method: row.payment_method.into(),
            installment_count: row.installment_count,
            gateway_transaction_id: row.gateway_transaction_id,
            gateway_fee: row.gateway_fee,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SplitRow {
    sale_id: String,
    participant_type: String,
    net_amount: i64,
    percentage: Decimal,
    priority: i32,
    liable_for_refund: bool,
    liable_for_chargeback: bool,
    created_at: DateTime<Utc>,
}

impl From<SplitRow> for RevenueSplit {
    fn from(row: SplitRow) -> Self {
        Self {
            sale_id: row.sale_id,
            participant_type: row.participant_type.into(),
            net_amount: row.net_amount,
            percentage: row.percentage,
            priority: row.priority,
            liable_for_refund: row.liable_for_refund,
            liable_for_chargeback: row.liable_for_chargeback,
            created_at: row.created_at,
        }
    }
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn fetch_orders(
        &self,
        tenant_id: &str,
        window: &AggregationWindow,
    ) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, total_amount, payment_method, status, source, created_at, sale_id
            FROM orders
            WHERE tenant_id = ? AND created_at >= ? AND created_at < ?
            ORDER BY created_at
            "#,
        )
        .bind(tenant_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn fetch_sales(
        &self,
        tenant_id: &str,
        window: &AggregationWindow,
    ) -> Result<Vec<SaleRecord>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, total_amount, subtotal_amount, payment_method, installment_count,
                   gateway_transaction_id, gateway_fee, created_at
            FROM sales
            WHERE tenant_id = ? AND created_at >= ? AND created_at < ?
            "#,
        )
        .bind(tenant_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SaleRecord::from).collect())
    }

    async fn fetch_splits(
        &self,
        tenant_id: &str,
        window: &AggregationWindow,
    ) -> Result<Vec<RevenueSplit>> {
        let rows = sqlx::query_as::<_, SplitRow>(
            r#"
            SELECT sale_id, participant_type, net_amount, percentage, priority,
                   liable_for_refund, liable_for_chargeback, created_at
            FROM revenue_splits
            WHERE tenant_id = ? AND created_at >= ? AND created_at < ?
            ORDER BY sale_id, priority
            "#,
        )
        .bind(tenant_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RevenueSplit::from).collect())
    }
}
