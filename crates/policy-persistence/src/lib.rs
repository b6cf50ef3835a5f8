//! Policy Persistence - application storage for the policy server
//!
//! This crate provides:
//! - SeaORM entity definitions for the application tables
//! - A pure aggregator that rebuilds nested applications from flat row sets
//! - A query compiler and database client for the write path
//! - A transactional writer coupled to the approval vendor sync
//! - A reader that loads and aggregates applications

pub mod aggregate;
pub mod client;
pub mod entity;
pub mod error;
pub mod model;
pub mod reader;
pub mod rows;
pub mod sql;
pub mod traits;
pub mod writer;

// Re-export sea-orm for convenience
pub use sea_orm;

pub use aggregate::aggregate;
pub use client::{DatabaseClient, TransactionWork, get_one};
pub use error::{
    AggregateError, ChildWriteError, LoadError, StoreError, StoreStage, SyncError,
    TransactionError,
};
pub use model::{
    AppFilter, Application, Category, Country, Permission, Service, ServicePermission,
};
pub use reader::ApplicationReader;
pub use rows::AppRowSets;
pub use sql::{ChildTable, ChildWrite, QueryCompiler};
pub use traits::ApprovalVendorSync;
pub use writer::ApplicationWriter;

/// Stored root record returned by the writer and sent to the approval vendor
pub use entity::app_info::Model as StoredApp;
