//! Error types for aggregation, storage, and the approval-vendor boundary

use sea_orm::DbErr;

use crate::sql::ChildTable;

/// Raised when flat row sets are not referentially consistent
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("{collection} row references application {app_id} which is not in the base row set")]
    MissingParent {
        collection: &'static str,
        app_id: i32,
    },
}

/// A queued child-table write failed inside the store transaction
#[derive(Debug, thiserror::Error)]
#[error("failed to write {table}: {source}")]
pub struct ChildWriteError {
    pub table: ChildTable,
    #[source]
    pub source: DbErr,
}

/// The approval vendor sync call failed or reported failure
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("approval vendor request failed: {0}")]
    Request(String),

    #[error("approval vendor rejected sync with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Stage of the store pipeline an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStage {
    Validate,
    AppInfo,
    ChildWrites,
    ApprovalVendorSync,
    Transaction,
}

impl StoreStage {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreStage::Validate => "validate",
            StoreStage::AppInfo => "app_info",
            StoreStage::ChildWrites => "child_writes",
            StoreStage::ApprovalVendorSync => "approval_vendor_sync",
            StoreStage::Transaction => "transaction",
        }
    }
}

impl std::fmt::Display for StoreStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a single store pipeline run
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid application: {0}")]
    InvalidApplication(String),

    #[error("failed to upsert app info: {0}")]
    AppInfo(#[source] DbErr),

    #[error(transparent)]
    ChildWrite(#[from] ChildWriteError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Begin or commit failed
    #[error("transaction failed: {0}")]
    Transaction(#[from] DbErr),
}

impl StoreError {
    pub fn stage(&self) -> StoreStage {
        match self {
            StoreError::InvalidApplication(_) => StoreStage::Validate,
            StoreError::AppInfo(_) => StoreStage::AppInfo,
            StoreError::ChildWrite(_) => StoreStage::ChildWrites,
            StoreError::Sync(_) => StoreStage::ApprovalVendorSync,
            StoreError::Transaction(_) => StoreStage::Transaction,
        }
    }
}

/// Writer-boundary error: which application failed, and why.
///
/// Carries the external uuid because the surrogate id may never have been
/// visible to the caller. Nothing was persisted when this is returned.
#[derive(Debug, thiserror::Error)]
#[error("failed to store application {app_uuid} at stage {}: {source}", .source.stage())]
pub struct TransactionError {
    pub app_uuid: String,
    #[source]
    pub source: StoreError,
}

impl TransactionError {
    pub fn new(app_uuid: impl Into<String>, source: StoreError) -> Self {
        Self {
            app_uuid: app_uuid.into(),
            source,
        }
    }

    pub fn stage(&self) -> StoreStage {
        self.source.stage()
    }
}

/// Read-path failure
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
