//! Approval vendor adapters
//!
//! [`HttpApprovalVendor`] POSTs stored application records to the vendor's
//! sync endpoint. [`DisabledApprovalVendor`] stands in when no endpoint is
//! configured. Neither retries; a failed sync fails the surrounding store.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use policy_persistence::{ApprovalVendorSync, StoredApp, SyncError};

/// Longest response body kept in a [`SyncError::Rejected`]
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Serialize)]
struct ApprovalVendorRequest<'a> {
    applications: Vec<VendorApplication<'a>>,
}

#[derive(Debug, Serialize)]
struct VendorApplication<'a> {
    uuid: &'a str,
    version_id: Option<i32>,
    approval_status: &'a str,
}

impl<'a> ApprovalVendorRequest<'a> {
    fn from_records(records: &'a [StoredApp]) -> Self {
        Self {
            applications: records
                .iter()
                .map(|record| VendorApplication {
                    uuid: &record.app_uuid,
                    version_id: record.version_id,
                    approval_status: &record.approval_status,
                })
                .collect(),
        }
    }
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

/// HTTP client for the approval vendor's sync endpoint
pub struct HttpApprovalVendor {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpApprovalVendor {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl ApprovalVendorSync for HttpApprovalVendor {
    async fn set_application_approval_vendor(
        &self,
        records: &[StoredApp],
    ) -> Result<(), SyncError> {
        let payload = ApprovalVendorRequest::from_records(records);

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Approval vendor request failed");
            SyncError::Request(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(
                url = %self.url,
                count = records.len(),
                status = status.as_u16(),
                "Approval vendor sync accepted"
            );
            return Ok(());
        }

        let body = truncate_body(response.text().await.unwrap_or_default());
        warn!(
            url = %self.url,
            status = status.as_u16(),
            body = %body,
            "Approval vendor rejected sync"
        );
        Err(SyncError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Used when no vendor endpoint is configured: every sync succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledApprovalVendor;

#[async_trait]
impl ApprovalVendorSync for DisabledApprovalVendor {
    async fn set_application_approval_vendor(
        &self,
        records: &[StoredApp],
    ) -> Result<(), SyncError> {
        for record in records {
            info!(
                app_uuid = %record.app_uuid,
                version_id = ?record.version_id,
                "Approval vendor disabled, sync skipped"
            );
        }
        Ok(())
    }
}
