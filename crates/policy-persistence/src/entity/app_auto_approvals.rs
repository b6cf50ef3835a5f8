//! `SeaORM` Entity for app_auto_approvals table
//!
//! Keyed by external uuid so the flag survives new versions of an app.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_auto_approvals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub app_uuid: String,
    pub created_ts: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
