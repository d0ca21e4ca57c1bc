// src/repositories/row_mapping.rs
//
// Column conversions shared by the SQLite repositories.
// Parse failures are explicit errors, never silent defaults.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Epoch milliseconds to UTC timestamp
pub(crate) fn timestamp_from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// UTC timestamp to epoch milliseconds
pub(crate) fn timestamp_to_millis(timestamp: Option<DateTime<Utc>>) -> Option<i64> {
    timestamp.map(|t| t.timestamp_millis())
}

pub(crate) fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Genres are stored as a JSON array of strings
pub(crate) fn genres_from_json(raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

pub(crate) fn genres_to_json(genres: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(genres)
}

/// Comma separated ids as produced by GROUP_CONCAT, sorted ascending
pub(crate) fn id_list(raw: Option<String>) -> rusqlite::Result<Vec<i64>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut ids = raw
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| conversion_error(0, format!("Invalid id '{}': {}", part, e)))
        })
        .collect::<rusqlite::Result<Vec<i64>>>()?;

    ids.sort_unstable();
    Ok(ids)
}
