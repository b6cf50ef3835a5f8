pub mod config;

pub use config::{ApprovalVendorConfig, Configuration};
