//! `SeaORM` Entity for app_countries table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_countries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub country_iso: String,
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
        belongs_to = "super::countries::Entity",
        from = "Column::CountryIso",
        to = "super::countries::Column::Iso"
    )]
    Countries,
}

impl Related<super::app_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppInfo.def()
    }
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
