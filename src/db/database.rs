// src/db/database.rs
//
// Shared database handle: connection pool plus change notifier.
//
// Reads run on the blocking thread pool. Writes run inside a transaction and
// publish the touched tables only after the commit succeeded, so a live
// query re-running on another connection always sees the new rows.

use std::sync::Arc;

use rusqlite::Connection;

use crate::config::LibraryConfig;
use crate::db::changes::{ChangeNotifier, Table};
use crate::db::connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn};
use crate::db::migrations::initialize_database;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<ConnectionPool>,
    changes: Arc<ChangeNotifier>,
}

impl Database {
    /// Open (and initialize if needed) the configured database
    pub fn open(config: &LibraryConfig) -> AppResult<Self> {
        let pool = create_connection_pool(config)?;

        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        Ok(Self::from_pool(Arc::new(pool), config.change_buffer))
    }

    /// Wrap an existing pool. The schema is expected to be initialized.
    pub fn from_pool(pool: Arc<ConnectionPool>, change_buffer: usize) -> Self {
        Self {
            pool,
            changes: Arc::new(ChangeNotifier::new(change_buffer)),
        }
    }

    pub fn changes(&self) -> &ChangeNotifier {
        &self.changes
    }

    /// Get a pooled connection on the current thread
    pub fn connection(&self) -> AppResult<PooledConn> {
        get_connection(&self.pool)
    }

    /// Run a read on the blocking thread pool
    pub async fn read<T, F>(&self, query: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            query(&*conn)
        })
        .await?
    }

    /// Run a write in a transaction, then publish `tables` as changed.
    ///
    /// Nothing is published when the write fails or rolls back.
    pub fn write<T, F>(&self, tables: &[Table], mutation: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let result = mutation(&*tx)?;
        tx.commit()?;

        self.changes.notify(tables);
        Ok(result)
    }
}
