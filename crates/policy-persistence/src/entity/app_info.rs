//! `SeaORM` Entity for app_info table
//!
//! One row per submitted application version. Every child table hangs off
//! `id`; the auto-approval and blacklist tables key on `app_uuid` instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External uuid issued by the approval vendor
    pub app_uuid: String,
    pub app_short_uuid: Option<String>,
    pub name: String,
    pub vendor_name: String,
    pub vendor_email: Option<String>,
    /// Vendor-side version id; only set once the version is known upstream
    pub version_id: Option<i32>,
    pub platform: String,
    pub platform_version: Option<String>,
    pub approval_status: String,
    pub can_background_alert: bool,
    pub can_steal_focus: bool,
    pub default_hmi_level: String,
    pub tech_email: Option<String>,
    pub tech_phone: Option<String>,
    pub category_id: i32,
    pub created_ts: DateTime,
    pub updated_ts: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
