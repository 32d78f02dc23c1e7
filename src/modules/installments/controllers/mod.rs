pub mod installment_controller;

pub use installment_controller::{configure, get_options, get_quote, simulate};
