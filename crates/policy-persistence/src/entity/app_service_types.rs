//! `SeaORM` Entity for app_service_types table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_service_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_type_name: String,
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
        belongs_to = "super::service_types::Entity",
        from = "Column::ServiceTypeName",
        to = "super::service_types::Column::Name"
    )]
    ServiceTypes,
}

impl Related<super::app_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppInfo.def()
    }
}

impl Related<super::service_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
