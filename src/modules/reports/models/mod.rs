pub mod order;
pub mod revenue_split;
pub mod sale;
pub mod split_report;
pub mod window;

pub use order::{OrderRecord, OrderSource, OrderStatus, PaymentMethod};
pub use revenue_split::{ParticipantType, RevenueSplit};
pub use sale::SaleRecord;
pub use split_report::{AggregationResult, ChannelBreakdown, SaleReportRow, SplitTotals};
pub use window::AggregationWindow;
