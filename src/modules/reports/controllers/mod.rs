pub mod report_controller;

pub use report_controller::{configure, export_split_report, get_split_report};
