//! Domain model types for applications
//!
//! `Application` is both the shape the read path emits and the write-object
//! accepted by the writer. An absent `id` on a write-object means "insert".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use policy_common::{DEFAULT_APPROVAL_STATUS, DEFAULT_HMI_LEVEL};

fn default_approval_status() -> String {
    DEFAULT_APPROVAL_STATUS.as_str().to_string()
}

fn default_hmi_level() -> String {
    DEFAULT_HMI_LEVEL.as_str().to_string()
}

/// Fully nested application as exposed to API consumers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub uuid: String,
    #[serde(default)]
    pub short_uuid: Option<String>,
    pub name: String,
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_email: Option<String>,
    #[serde(default)]
    pub version_id: Option<i32>,
    pub platform: String,
    #[serde(default)]
    pub platform_version: Option<String>,
    #[serde(default = "default_approval_status")]
    pub approval_status: String,
    #[serde(default)]
    pub can_background_alert: bool,
    #[serde(default)]
    pub can_steal_focus: bool,
    #[serde(default = "default_hmi_level")]
    pub default_hmi_level: String,
    #[serde(default)]
    pub tech_email: Option<String>,
    #[serde(default)]
    pub tech_phone: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub is_auto_approved_enabled: bool,
    #[serde(default)]
    pub is_blacklisted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_ts: Option<NaiveDateTime>,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub display_names: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// Category reference; the display name is resolved through a lookup and is
/// `None` when the id is unknown
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// RPC permission requested by the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub key: String,
    pub hmi_level: String,
    #[serde(rename = "type", default)]
    pub permission_type: Option<String>,
}

/// App service the application publishes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub service_names: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<ServicePermission>,
}

/// Permission attached to an app service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePermission {
    /// Owning application; ignored on write, the writer binds the stored id
    #[serde(default)]
    pub app_id: Option<i32>,
    #[serde(default)]
    pub function_id: Option<i32>,
    #[serde(default)]
    pub display_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_selected: bool,
}

/// Selection criteria for the read path; all set fields must match
#[derive(Clone, Debug, Default)]
pub struct AppFilter {
    pub id: Option<i32>,
    pub uuid: Option<String>,
    pub approval_status: Option<policy_common::ApprovalStatus>,
}

impl AppFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_object_defaults() {
        let json = r#"{
            "uuid": "u1",
            "name": "Radio",
            "vendor_name": "Acme",
            "platform": "ANDROID",
            "category": {"id": 5}
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();

        assert_eq!(app.id, None);
        assert_eq!(app.approval_status, "PENDING");
        assert_eq!(app.default_hmi_level, "HMI_NONE");
        assert_eq!(app.category.display_name, None);
        assert!(!app.is_auto_approved_enabled);
        assert!(!app.is_blacklisted);
        assert!(app.countries.is_empty());
        assert!(app.display_names.is_empty());
        assert!(app.permissions.is_empty());
        assert!(app.services.is_empty());
    }

    #[test]
    fn test_permission_type_field_name() {
        let permission = Permission {
            key: "GetVehicleData".to_string(),
            hmi_level: "HMI_FULL".to_string(),
            permission_type: Some("RPC".to_string()),
        };
        let value = serde_json::to_value(&permission).unwrap();
        assert_eq!(value["type"], "RPC");
        assert!(value.get("permission_type").is_none());
    }

    #[test]
    fn test_collections_always_serialized() {
        let value = serde_json::to_value(Application::default()).unwrap();
        for field in ["countries", "display_names", "permissions", "services"] {
            assert!(value[field].is_array(), "{} should be an array", field);
        }
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_app_filter_constructors() {
        assert_eq!(AppFilter::by_id(3).id, Some(3));
        assert_eq!(AppFilter::by_uuid("u1").uuid.as_deref(), Some("u1"));
    }
}
