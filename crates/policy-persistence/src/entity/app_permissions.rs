//! `SeaORM` Entity for app_permissions table
//!
//! The permission type is not stored here; it is joined from `permissions`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub hmi_level: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_info::Entity",
        from = "Column::AppId",
        to = "super::app_info::Column::Id"
    )]
    AppInfo,
    #[sea_orm(
        belongs_to = "super::permissions::Entity",
        from = "Column::PermissionName",
        to = "super::permissions::Column::Name"
    )]
    Permissions,
}

impl Related<super::app_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppInfo.def()
    }
}

impl Related<super::permissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
