//! Approval vendor sync boundary
//!
//! The approval vendor keeps its own copy of each application's approval
//! state and cannot roll back. The writer awaits this call inside its open
//! transaction, so a failure here rolls back the local write.

use async_trait::async_trait;

use crate::entity::app_info;
use crate::error::SyncError;

/// Pushes stored application records to the external approval vendor
#[async_trait]
pub trait ApprovalVendorSync: Send + Sync {
    /// Report the given stored records to the vendor. Implementations must not
    /// retry; resubmission is the caller's decision.
    async fn set_application_approval_vendor(
        &self,
        records: &[app_info::Model],
    ) -> Result<(), SyncError>;
}
