//! Database client: single-row queries and scoped transactions
//!
//! Wraps a SeaORM `DatabaseConnection`. Work that must be atomic implements
//! [`TransactionWork`] and is handed to [`DatabaseClient::run_as_transaction`],
//! which owns the transaction handle for the whole run.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, QueryResult,
    Statement, TransactionTrait,
};
use tracing::warn;

/// A unit of work executed inside one transaction
#[async_trait]
pub trait TransactionWork: Send + Sync {
    type Output: Send;
    type Error: From<DbErr> + Send;

    async fn run(&self, txn: &DatabaseTransaction) -> Result<Self::Output, Self::Error>;
}

/// Database client shared by the reader and writer
#[derive(Clone, Debug)]
pub struct DatabaseClient {
    db: DatabaseConnection,
}

impl DatabaseClient {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// Run `work` in a fresh transaction.
    ///
    /// Commits when `work` succeeds and rolls back otherwise. A failed commit
    /// is reported through `W::Error` like any other failure.
    pub async fn run_as_transaction<W>(&self, work: &W) -> Result<W::Output, W::Error>
    where
        W: TransactionWork + ?Sized,
    {
        let txn = self.db.begin().await?;
        match work.run(&txn).await {
            Ok(output) => {
                txn.commit().await?;
                Ok(output)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Execute a statement that must yield exactly one row
pub async fn get_one<C>(conn: &C, statement: Statement) -> Result<QueryResult, DbErr>
where
    C: ConnectionTrait,
{
    conn.query_one(statement)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("query returned no rows".to_string()))
}
