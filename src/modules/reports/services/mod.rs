pub mod report_service;
pub mod split_aggregator;

pub use report_service::ReportService;
pub use split_aggregator::{SaleCosts, SplitAggregator};
