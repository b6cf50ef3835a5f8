//! Process startup: logging and collaborator wiring

pub mod logging;

use std::sync::Arc;

use policy_persistence::ApprovalVendorSync;
use tracing::info;

use crate::model::ApprovalVendorConfig;
use crate::sync::{DisabledApprovalVendor, HttpApprovalVendor};

pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};

/// Build the approval vendor once per process from its configuration.
pub fn approval_vendor(
    config: &ApprovalVendorConfig,
) -> anyhow::Result<Arc<dyn ApprovalVendorSync>> {
    match &config.url {
        Some(url) => {
            info!(url = %url, timeout_ms = config.timeout_ms, "Approval vendor sync enabled");
            let vendor = HttpApprovalVendor::new(url, config.api_key.clone(), config.timeout())?;
            Ok(Arc::new(vendor))
        }
        None => {
            info!("No approval vendor url configured, vendor sync disabled");
            Ok(Arc::new(DisabledApprovalVendor))
        }
    }
}
