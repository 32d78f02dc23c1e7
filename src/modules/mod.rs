pub mod health;
pub mod installments;
pub mod reports;

use actix_web::web;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    installments::configure(cfg);
    reports::configure(cfg);
}
