pub mod fee_table;
pub mod installment_quote;

pub use fee_table::{InstallmentFeeTable, InstallmentPolicy, InstallmentSettings};
pub use installment_quote::InstallmentQuote;
