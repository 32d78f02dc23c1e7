pub mod installment_pricer;
pub mod installment_service;

pub use installment_pricer::InstallmentPricer;
pub use installment_service::InstallmentService;
