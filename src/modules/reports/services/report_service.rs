use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::ReportingConfig;
use crate::core::{AppError, Result};
use crate::modules::reports::models::{AggregationResult, AggregationWindow};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::SplitAggregator;

/// Service for generating split and profitability reports
#[derive(Clone)]
pub struct ReportService {
    report_repo: Arc<dyn ReportRepository>,
    config: ReportingConfig,
}

impl ReportService {
    pub fn new(report_repo: Arc<dyn ReportRepository>, config: ReportingConfig) -> Self {
        Self {
            report_repo,
            config,
        }
    }

    /// Turn requested dates into a reporting window
    ///
    /// Both dates are inclusive calendar days in UTC. Without dates the
    /// trailing window from configuration, ending at `now`, is used.
    ///
    /// # Errors
    /// Validation error when only one date is given, when `start_date` is
    /// after `end_date`, or when the range exceeds the configured maximum.
    pub fn resolve_window(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<AggregationWindow> {
        let (start_date, end_date) = match (start_date, end_date) {
            (None, None) => {
                return Ok(AggregationWindow::trailing_days(now, self.config.window_days));
            }
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::validation(
                    "start_date and end_date must be given together",
                ));
            }
        };

        if start_date > end_date {
            return Err(AppError::validation(format!(
                "start_date ({}) must be before or equal to end_date ({})",
                start_date, end_date
            )));
        }

        let days = (end_date - start_date).num_days() + 1;
        if days > i64::from(self.config.max_range_days) {
            return Err(AppError::validation(format!(
                "Date range too large: {} days (maximum {} days)",
                days, self.config.max_range_days
            )));
        }

        // end_date is inclusive; the window ends at midnight of the next day
        let next_day = end_date.succ_opt().ok_or_else(|| {
            AppError::validation(format!("end_date ({}) is out of range", end_date))
        })?;

        let start = start_date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let end = next_day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());

        match (start, end) {
            (Some(start), Some(end)) => Ok(AggregationWindow::new(start, end)),
            _ => Err(AppError::internal("Failed to build reporting window")),
        }
    }

    /// Aggregate the tenant's orders, sales and splits over `window`
    pub async fn generate_split_report(
        &self,
        tenant_id: &str,
        window: AggregationWindow,
    ) -> Result<AggregationResult> {
        info!(
            tenant_id,
            start = %window.start(),
            end = %window.end(),
            "Generating split report"
        );

        let (orders, sales, splits) = tokio::try_join!(
            self.report_repo.fetch_orders(tenant_id, &window),
            self.report_repo.fetch_sales(tenant_id, &window),
            self.report_repo.fetch_splits(tenant_id, &window),
        )?;

        let report = SplitAggregator::aggregate(&orders, &sales, &splits, &window);

        if report.is_empty() {
            warn!(
                tenant_id,
                "Empty split report for {} to {}",
                window.start(),
                window.end()
            );
        } else {
            info!(
                tenant_id,
                orders = report.order_count,
                settled = report.settled_order_count,
                sales = report.rows.len(),
                ignored_splits = report.ignored_split_count,
                paid_gmv = report.paid_gmv,
                platform_profit = report.platform_profit,
                "Split report generated"
            );
        }

        Ok(report)
    }
}
