use actix_web::{http::header, web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::middleware::AuthenticatedTenant;
use crate::modules::reports::models::AggregationWindow;
use crate::modules::reports::services::ReportService;

/// Query parameters for split report endpoints
#[derive(Debug, Deserialize)]
pub struct SplitReportQuery {
    /// Start of reporting period (inclusive, format: YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of reporting period (inclusive, format: YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                AppError::validation(format!(
                    "Invalid {} format: '{}'. Expected YYYY-MM-DD",
                    field, raw
                ))
            })
        })
        .transpose()
}

fn window_from_query(service: &ReportService, query: &SplitReportQuery) -> Result<AggregationWindow> {
    let start_date = parse_date("start_date", query.start_date.as_deref())?;
    let end_date = parse_date("end_date", query.end_date.as_deref())?;

    service.resolve_window(start_date, end_date, Utc::now())
}

/// GET /reports/splits
///
/// Split totals, profitability and channel breakdowns for the tenant.
pub async fn get_split_report(
    tenant: web::ReqData<AuthenticatedTenant>,
    service: web::Data<ReportService>,
    query: web::Query<SplitReportQuery>,
) -> Result<HttpResponse> {
    let window = window_from_query(&service, &query)?;
    let report = service
        .generate_split_report(&tenant.tenant_id, window)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/splits/export
///
/// Per-sale report rows as CSV.
pub async fn export_split_report(
    tenant: web::ReqData<AuthenticatedTenant>,
    service: web::Data<ReportService>,
    query: web::Query<SplitReportQuery>,
) -> Result<HttpResponse> {
    let window = window_from_query(&service, &query)?;
    let report = service
        .generate_split_report(&tenant.tenant_id, window)
        .await?;

    let body = report.to_csv()?;
    let filename = format!(
        "splits_{}_{}.csv",
        window.start().format("%Y%m%d"),
        window.end().format("%Y%m%d")
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/splits", web::get().to(get_split_report))
            .route("/splits/export", web::get().to(export_split_report)),
    );
}
