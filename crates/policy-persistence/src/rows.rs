//! Flat row sets produced by the read queries
//!
//! Each child row carries the surrogate id of its owning application (`id`
//! or `app_id`); the auto-approval and blacklist rows carry the external uuid.

use sea_orm::FromQueryResult;

use crate::entity::{app_info, categories};

/// Base row; one per application version
pub type AppBaseRow = app_info::Model;

/// Category lookup row
pub type CategoryRow = categories::Model;

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct CountryRow {
    pub id: i32,
    pub country_iso: String,
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct DisplayNameRow {
    pub id: i32,
    pub display_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct PermissionRow {
    pub id: i32,
    pub permission_name: String,
    pub hmi_level: String,
    pub permission_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct ServiceTypeRow {
    pub app_id: i32,
    pub service_type_name: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct ServiceTypeNameRow {
    pub app_id: i32,
    pub service_type_name: String,
    pub service_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct ServiceTypePermissionRow {
    pub app_id: i32,
    pub service_type_name: String,
    pub function_id: Option<i32>,
    pub display_name: Option<String>,
    pub name: String,
    pub is_selected: bool,
}

/// Row of the auto-approval or blacklist set
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct AppUuidRow {
    pub app_uuid: String,
}

impl AppUuidRow {
    pub fn new(app_uuid: impl Into<String>) -> Self {
        Self {
            app_uuid: app_uuid.into(),
        }
    }
}

/// The full set of parallel row sets that describe a batch of applications
#[derive(Clone, Debug, Default)]
pub struct AppRowSets {
    pub base: Vec<AppBaseRow>,
    pub countries: Vec<CountryRow>,
    pub display_names: Vec<DisplayNameRow>,
    pub permissions: Vec<PermissionRow>,
    pub categories: Vec<CategoryRow>,
    pub service_types: Vec<ServiceTypeRow>,
    pub service_type_names: Vec<ServiceTypeNameRow>,
    pub service_type_permissions: Vec<ServiceTypePermissionRow>,
    pub auto_approvals: Vec<AppUuidRow>,
    pub blacklist: Vec<AppUuidRow>,
}
