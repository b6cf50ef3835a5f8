//! Transactional application writer
//!
//! Stores one `Application` write-object across the root table and its child
//! tables in a single transaction. Stages run strictly in order:
//!
//! 1. upsert the `app_info` root row and capture the stored record
//! 2. queue the child writes for every non-empty collection
//! 3. execute the queued writes, bound to the stored id
//! 4. sync the stored record to the approval vendor when it has a `version_id`
//! 5. commit
//!
//! Any failure rolls the whole transaction back, including a failed vendor
//! sync, and is reported as a [`TransactionError`] carrying the write-object's
//! uuid. Nothing is retried here.
//!
//! Two calls for the same uuid are not serialized by the writer; isolation is
//! whatever the database transaction provides.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseTransaction, FromQueryResult};
use tracing::{debug, info, warn};

use policy_common::{ApprovalStatus, HmiLevel, is_valid_app_uuid};

use crate::client::{DatabaseClient, TransactionWork, get_one};
use crate::entity::app_info;
use crate::error::{ChildWriteError, StoreError, TransactionError};
use crate::model::Application;
use crate::sql::{ChildWrite, QueryCompiler};
use crate::traits::ApprovalVendorSync;

/// Persists applications; construct once and share
pub struct ApplicationWriter {
    client: DatabaseClient,
    compiler: QueryCompiler,
    approval_vendor: Arc<dyn ApprovalVendorSync>,
}

impl ApplicationWriter {
    pub fn new(client: DatabaseClient, approval_vendor: Arc<dyn ApprovalVendorSync>) -> Self {
        let compiler = QueryCompiler::new(client.backend());
        Self {
            client,
            compiler,
            approval_vendor,
        }
    }

    /// Store `app` and return the stored root record (without child rows).
    pub async fn store_app(&self, app: &Application) -> Result<app_info::Model, TransactionError> {
        validate(app).map_err(|source| TransactionError::new(&app.uuid, source))?;

        let work = StoreApp {
            app,
            compiler: &self.compiler,
            approval_vendor: self.approval_vendor.as_ref(),
        };

        match self.client.run_as_transaction(&work).await {
            Ok(stored) => Ok(stored),
            Err(source) => {
                warn!(
                    app_uuid = %app.uuid,
                    stage = %source.stage(),
                    error = %source,
                    "Failed to store application, transaction rolled back"
                );
                Err(TransactionError::new(&app.uuid, source))
            }
        }
    }
}

struct StoreApp<'a> {
    app: &'a Application,
    compiler: &'a QueryCompiler,
    approval_vendor: &'a dyn ApprovalVendorSync,
}

#[async_trait]
impl<'a> TransactionWork for StoreApp<'a> {
    type Output = app_info::Model;
    type Error = StoreError;

    async fn run(&self, txn: &DatabaseTransaction) -> Result<app_info::Model, StoreError> {
        let stored = upsert_app_info(txn, self.compiler, self.app).await?;
        info!(
            app_uuid = %stored.app_uuid,
            app_id = stored.id,
            "New/updated app added to the database"
        );

        let writes = self.compiler.child_writes(self.app, stored.id);
        execute_child_writes(txn, writes).await?;

        sync_approval_vendor(self.approval_vendor, &stored).await?;

        Ok(stored)
    }
}

/// Reject write-objects that could never be stored correctly, before any
/// transaction is opened.
fn validate(app: &Application) -> Result<(), StoreError> {
    if !is_valid_app_uuid(&app.uuid) {
        return Err(StoreError::InvalidApplication(format!(
            "invalid uuid '{}'",
            app.uuid
        )));
    }
    ApprovalStatus::from_str(&app.approval_status)
        .map_err(|e| StoreError::InvalidApplication(e.to_string()))?;
    HmiLevel::from_str(&app.default_hmi_level)
        .map_err(|e| StoreError::InvalidApplication(e.to_string()))?;
    for permission in &app.permissions {
        HmiLevel::from_str(&permission.hmi_level).map_err(|e| {
            StoreError::InvalidApplication(format!("permission {}: {}", permission.key, e))
        })?;
    }
    Ok(())
}

async fn upsert_app_info(
    txn: &DatabaseTransaction,
    compiler: &QueryCompiler,
    app: &Application,
) -> Result<app_info::Model, StoreError> {
    let row = get_one(txn, compiler.insert_app_info(app))
        .await
        .map_err(StoreError::AppInfo)?;
    app_info::Model::from_query_result(&row, "").map_err(StoreError::AppInfo)
}

async fn execute_child_writes<C>(conn: &C, writes: Vec<ChildWrite>) -> Result<(), StoreError>
where
    C: ConnectionTrait,
{
    for write in writes {
        debug!(table = %write.table, "Executing child write");
        conn.execute(write.statement)
            .await
            .map_err(|source| ChildWriteError {
                table: write.table,
                source,
            })?;
    }
    Ok(())
}

async fn sync_approval_vendor(
    approval_vendor: &dyn ApprovalVendorSync,
    stored: &app_info::Model,
) -> Result<(), StoreError> {
    if stored.version_id.is_none() {
        debug!(app_uuid = %stored.app_uuid, "No version id, skipping approval vendor sync");
        return Ok(());
    }
    approval_vendor
        .set_application_approval_vendor(std::slice::from_ref(stored))
        .await?;
    debug!(app_uuid = %stored.app_uuid, "Approval vendor sync succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreStage;
    use crate::model::{Category, Permission};

    fn valid_app() -> Application {
        Application {
            uuid: "dfda5c35-700e-487e-87d2-ea4b2c572802".to_string(),
            name: "Radio".to_string(),
            vendor_name: "Acme".to_string(),
            platform: "ANDROID".to_string(),
            approval_status: "PENDING".to_string(),
            default_hmi_level: "HMI_NONE".to_string(),
            category: Category {
                id: 5,
                display_name: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_app() {
        assert!(validate(&valid_app()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut app = valid_app();
        app.uuid = String::new();
        assert_eq!(validate(&app).unwrap_err().stage(), StoreStage::Validate);

        let mut app = valid_app();
        app.approval_status = "APPROVED".to_string();
        assert!(matches!(
            validate(&app),
            Err(StoreError::InvalidApplication(_))
        ));

        let mut app = valid_app();
        app.permissions.push(Permission {
            key: "GetVehicleData".to_string(),
            hmi_level: "FULL".to_string(),
            permission_type: None,
        });
        let err = validate(&app).unwrap_err();
        assert!(err.to_string().contains("GetVehicleData"));
    }
}
