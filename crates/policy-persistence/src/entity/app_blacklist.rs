//! `SeaORM` Entity for app_blacklist table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_blacklist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_uuid: String,
    pub created_ts: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
