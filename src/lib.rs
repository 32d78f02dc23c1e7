//! Vitrine storefront pricing and split reporting service
//!
//! Installment-with-interest pricing for storefront and checkout surfaces, and
//! gateway revenue-split aggregation for the financial dashboard. Both cores
//! are pure functions over integer minor-unit amounts; the HTTP, persistence
//! and configuration layers around them live alongside.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod telemetry;

// Re-export commonly used types
pub use modules::installments;
pub use modules::reports;
