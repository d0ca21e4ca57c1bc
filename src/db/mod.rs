// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Table change notification
// - Live (re-evaluated) queries

pub mod changes;
pub mod connection;
pub mod database;
pub mod live_query;
pub mod migrations;

pub use changes::{ChangeNotifier, Table, TableChange};

pub use connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn};

pub use database::Database;

pub use live_query::{observe, LiveQuery};

pub use migrations::{
    get_database_stats, get_schema_version, initialize_database, verify_database_integrity,
    DatabaseStats,
};
