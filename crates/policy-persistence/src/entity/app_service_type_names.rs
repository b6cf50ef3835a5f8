//! `SeaORM` Entity for app_service_type_names table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_service_type_names")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_type_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_name: String,
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
