//! `SeaORM` Entity for app_service_type_permissions table
//!
//! Function id and display name are copied from the submitted service so
//! the read path needs no extra join.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_service_type_permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_type_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_name: String,
    pub function_id: Option<i32>,
    pub display_name: Option<String>,
    pub is_selected: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_info::Entity",
        from = "Column::AppId",
        to = "super::app_info::Column::Id"
    )]
    AppInfo,
}

impl Related<super::app_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
