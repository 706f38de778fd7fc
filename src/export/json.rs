//! JSON Export functionality
//!
//! Exports every table to JSON with schema versioning.

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, Borrowing, Member};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot of the whole library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub borrowings: Vec<Borrowing>,

    pub metadata: SnapshotMetadata,
}

/// Counts included for quick reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub book_count: usize,
    pub member_count: usize,
    pub borrowing_count: usize,
    pub open_borrowing_count: usize,
    /// Earliest borrow date on record
    pub earliest_borrowing: Option<String>,
    /// Latest borrow date on record
    pub latest_borrowing: Option<String>,
}

impl LibrarySnapshot {
    /// Take a snapshot of the loaded tables
    pub fn from_storage(storage: &Storage) -> Self {
        let books = storage.books.all().to_vec();
        let members = storage.members.all().to_vec();
        let borrowings = storage.borrowings.all().to_vec();

        let metadata = SnapshotMetadata {
            book_count: books.len(),
            member_count: members.len(),
            borrowing_count: borrowings.len(),
            open_borrowing_count: borrowings.iter().filter(|b| b.is_open()).count(),
            earliest_borrowing: borrowings
                .iter()
                .map(|b| b.borrow_date)
                .min()
                .map(|d| d.to_string()),
            latest_borrowing: borrowings
                .iter()
                .map(|b| b.borrow_date)
                .max()
                .map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            books,
            members,
            borrowings,
            metadata,
        }
    }
}

/// Export the whole library as JSON
pub fn export_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> LibraryResult<()> {
    let snapshot = LibrarySnapshot::from_storage(storage);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &snapshot)
    } else {
        serde_json::to_writer(&mut *writer, &snapshot)
    }
    .map_err(|e| LibraryError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LibraryError::Export(e.to_string()))?;
    Ok(())
}
