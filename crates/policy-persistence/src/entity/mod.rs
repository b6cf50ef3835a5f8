//! `SeaORM` entities for the application policy schema

pub mod app_auto_approvals;
pub mod app_blacklist;
pub mod app_countries;
pub mod app_display_names;
pub mod app_info;
pub mod app_permissions;
pub mod app_service_type_names;
pub mod app_service_type_permissions;
pub mod app_service_types;
pub mod categories;
pub mod countries;
pub mod permissions;
pub mod service_types;
