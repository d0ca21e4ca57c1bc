// src/db/changes.rs
//
// Table change notification
//
// Write repositories publish the tables they touched once their transaction
// has committed. Live queries listen here and re-run when a table they
// observe changes. Every publication is logged.

use std::fmt;

use tokio::sync::broadcast;

/// Tables whose mutations are published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Manga,
    Chapter,
    Category,
    MangaCategory,
}

impl Table {
    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Manga => "manga",
            Table::Chapter => "chapters",
            Table::Category => "categories",
            Table::MangaCategory => "manga_categories",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A committed mutation touching one or more tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableChange {
    tables: Vec<Table>,
}

impl TableChange {
    pub fn new(tables: &[Table]) -> Self {
        let mut deduped: Vec<Table> = Vec::with_capacity(tables.len());
        for table in tables {
            if !deduped.contains(table) {
                deduped.push(*table);
            }
        }
        Self { tables: deduped }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Whether this change touches any of the observed tables
    pub fn affects(&self, observed: &[Table]) -> bool {
        self.tables.iter().any(|table| observed.contains(table))
    }
}

/// Broadcasts committed table changes to live queries
#[derive(Debug)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<TableChange>,
}

impl ChangeNotifier {
    /// `capacity` bounds how many changes a slow subscriber may fall behind
    /// before it is told it lagged.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish that `tables` changed
    pub fn notify(&self, tables: &[Table]) {
        if tables.is_empty() {
            return;
        }

        let change = TableChange::new(tables);
        let names: Vec<&str> = change.tables().iter().map(Table::name).collect();

        // Err only means nobody is listening right now
        let receivers = self.sender.send(change).unwrap_or(0);

        log::debug!(
            "[CHANGE] {} | {} subscribers",
            names.join(", "),
            receivers
        );
    }

    /// Start receiving changes published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.sender.subscribe()
    }

    /// Number of live receivers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_change_deduplicates_tables() {
        let change = TableChange::new(&[Table::Manga, Table::Chapter, Table::Manga]);
        assert_eq!(change.tables(), &[Table::Manga, Table::Chapter]);
    }

    #[test]
    fn test_change_affects_observed_tables() {
        let change = TableChange::new(&[Table::Category]);

        assert!(change.affects(&[Table::Manga, Table::Category]));
        assert!(!change.affects(&[Table::Manga, Table::Chapter, Table::MangaCategory]));
    }

    #[test]
    fn test_notify_reaches_subscribers() {
        let notifier = ChangeNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.notify(&[Table::Chapter]);

        let change = rx.try_recv().unwrap();
        assert_eq!(change.tables(), &[Table::Chapter]);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_notify_without_tables_is_ignored() {
        let notifier = ChangeNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.notify(&[]);

        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_notify_without_subscribers_does_not_fail() {
        let notifier = ChangeNotifier::default();
        assert_eq!(notifier.subscriber_count(), 0);

        notifier.notify(&[Table::Manga]);
    }

    #[test]
    fn test_subscriber_count() {
        let notifier = ChangeNotifier::default();

        let _a = notifier.subscribe();
        let b = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 2);

        drop(b);
        assert_eq!(notifier.subscriber_count(), 1);
    }
}
