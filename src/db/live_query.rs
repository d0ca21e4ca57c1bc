// src/db/live_query.rs
//
// Live queries: a query re-evaluated whenever a table it observes changes.
//
// The stream is pull based. On each poll it waits for a relevant change,
// drains every change already queued behind it, then runs the query once.
// A slow consumer therefore only ever sees the latest state. The first poll
// emits the current state without waiting.
//
// The stream never ends on its own. It ends after yielding an error; the
// caller subscribes again to restart.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use rusqlite::Connection;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;

use crate::db::changes::{Table, TableChange};
use crate::db::database::Database;
use crate::error::AppResult;

type QueryFn<T> = dyn Fn(&Connection) -> AppResult<T> + Send + Sync;

/// State carried between polls of a live query stream
pub struct LiveQuery<T> {
    db: Database,
    tables: &'static [Table],
    changes: Receiver<TableChange>,
    query: Arc<QueryFn<T>>,
    emitted_initial: bool,
    failed: bool,
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Subscribes to changes immediately, so a mutation racing with the
    /// first evaluation still triggers a re-run.
    pub fn new<F>(db: Database, tables: &'static [Table], query: F) -> Self
    where
        F: Fn(&Connection) -> AppResult<T> + Send + Sync + 'static,
    {
        let changes = db.changes().subscribe();
        Self {
            db,
            tables,
            changes,
            query: Arc::new(query),
            emitted_initial: false,
            failed: false,
        }
    }

    /// Wait for the next relevant change, then drop everything queued behind
    /// it. Returns false once no more changes can arrive.
    async fn wait_for_change(&mut self) -> bool {
        loop {
            match self.changes.recv().await {
                Ok(change) if change.affects(self.tables) => break,
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Live query lagged behind {} table changes; re-querying", skipped);
                    break;
                }
                Err(RecvError::Closed) => return false,
            }
        }

        loop {
            match self.changes.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        true
    }

    /// Produce the next snapshot, or None when the stream is over
    async fn next_snapshot(&mut self) -> Option<AppResult<T>> {
        if self.failed {
            return None;
        }

        if self.emitted_initial {
            if !self.wait_for_change().await {
                return None;
            }
        } else {
            self.emitted_initial = true;
        }

        let query = Arc::clone(&self.query);
        let result = self.db.read(move |conn| query(conn)).await;

        if let Err(e) = &result {
            log::warn!("Live query failed, closing stream: {}", e);
            self.failed = true;
        }

        Some(result)
    }

    pub fn into_stream(self) -> BoxStream<'static, AppResult<T>> {
        stream::unfold(self, |mut live| async move {
            let item = live.next_snapshot().await?;
            Some((item, live))
        })
        .boxed()
    }
}

/// Stream `query` now and after every committed change to `tables`
pub fn observe<T, F>(db: Database, tables: &'static [Table], query: F) -> BoxStream<'static, AppResult<T>>
where
    T: Send + 'static,
    F: Fn(&Connection) -> AppResult<T> + Send + Sync + 'static,
{
    LiveQuery::new(db, tables, query).into_stream()
}
