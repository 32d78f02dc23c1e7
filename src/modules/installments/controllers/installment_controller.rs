use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::{money, MinorUnits, Result};
use crate::middleware::AuthenticatedTenant;
use crate::modules::installments::{
    models::{InstallmentFeeTable, InstallmentPolicy, InstallmentQuote},
    services::{InstallmentPricer, InstallmentService},
};

/// Upper bound accepted by the simulation endpoint
const MAX_SIMULATED_INSTALLMENTS: u32 = 24;

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    /// Total price in minor units
    pub amount: MinorUnits,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    pub amount: MinorUnits,
}

/// Request for POST /installments/simulate
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub amount: MinorUnits,
    pub max_installments: u32,
    #[serde(default)]
    pub fee_table: InstallmentFeeTable,
    #[serde(default)]
    pub fee_passed_to_buyer: bool,
}

/// One installment option, all amounts in minor units
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub installment_count: u32,
    pub installment_value: MinorUnits,
    pub total_with_interest: MinorUnits,
    /// Markup over the base price paid by the buyer
    pub interest: MinorUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<Vec<MinorUnits>>,
}

impl QuoteResponse {
    fn new(quote: InstallmentQuote, amount: MinorUnits, itemized: bool) -> Self {
        Self {
            installment_count: quote.installment_count,
            installment_value: quote.installment_value,
            total_with_interest: quote.total_with_interest,
            interest: (quote.total_with_interest - money::non_negative(amount)).max(0),
            installments: itemized.then(|| quote.itemize()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub amount: MinorUnits,
    pub options: Vec<QuoteResponse>,
}

fn options_response(amount: MinorUnits, quotes: Vec<InstallmentQuote>) -> OptionsResponse {
    OptionsResponse {
        amount: money::non_negative(amount),
        options: quotes
            .into_iter()
            .map(|quote| QuoteResponse::new(quote, amount, false))
            .collect(),
    }
}

/// GET /installments/quote
///
/// # Returns
/// - 200: Quote with per-installment itemization
/// - 400: Count is zero or above the tenant's maximum
pub async fn get_quote(
    tenant: web::ReqData<AuthenticatedTenant>,
    service: web::Data<InstallmentService>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse> {
    let quote = service
        .quote(&tenant.tenant_id, query.amount, query.count)
        .await?;

    Ok(HttpResponse::Ok().json(QuoteResponse::new(quote, query.amount, true)))
}

/// GET /installments/options
///
/// Every installment count the tenant offers, from 1 up to its maximum.
pub async fn get_options(
    tenant: web::ReqData<AuthenticatedTenant>,
    service: web::Data<InstallmentService>,
    query: web::Query<OptionsQuery>,
) -> Result<HttpResponse> {
    let quotes = service.options(&tenant.tenant_id, query.amount).await?;

    Ok(HttpResponse::Ok().json(options_response(query.amount, quotes)))
}

/// POST /installments/simulate
///
/// Prices a configuration the tenant is still editing; nothing is persisted.
pub async fn simulate(body: web::Json<SimulateRequest>) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.max_installments > MAX_SIMULATED_INSTALLMENTS {
        return Err(crate::core::AppError::validation(format!(
            "max_installments cannot exceed {}",
            MAX_SIMULATED_INSTALLMENTS
        )));
    }

    let quotes = InstallmentPricer::quote_all(
        request.amount,
        request.max_installments,
        &request.fee_table,
        InstallmentPolicy::from(request.fee_passed_to_buyer),
    );

    Ok(HttpResponse::Ok().json(options_response(request.amount, quotes)))
}

/// Configure routes for installments module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/installments")
            .route("/quote", web::get().to(get_quote))
            .route("/options", web::get().to(get_options))
            .route("/simulate", web::post().to(simulate)),
    );
}
