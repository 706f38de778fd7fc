//! Storage layer for library-cli
//!
//! Holds the three record tables in memory and persists them as CSV files
//! with an all-or-nothing rewrite after every mutation.

pub mod books;
pub mod borrowings;
pub mod file_io;
pub mod members;
pub mod table;

pub use books::BookTable;
pub use borrowings::BorrowingTable;
pub use file_io::{commit_staged, discard_staged, read_csv_rows, stage_csv, StagedFile};
pub use members::MemberTable;
pub use table::{Record, RecordId, Table};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LibraryPaths;
use crate::error::LibraryError;

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: LibraryPaths,
    pub books: BookTable,
    pub members: MemberTable,
    pub borrowings: BorrowingTable,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with audit logging enabled
    pub fn new(paths: LibraryPaths) -> Result<Self, LibraryError> {
        paths.ensure_directories()?;

        Ok(Self {
            books: BookTable::new(paths.books_file()),
            members: MemberTable::new(paths.members_file()),
            borrowings: BorrowingTable::new(paths.borrowings_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Turn audit logging on or off
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
    }

    pub fn paths(&self) -> &LibraryPaths {
        &self.paths
    }

    /// Load all tables from disk
    pub fn load_all(&mut self) -> Result<(), LibraryError> {
        self.books.load()?;
        self.members.load()?;
        self.borrowings.load()?;

        // Ids still referenced by history must not be handed to new records
        self.books.reserve_through(self.borrowings.max_book_ref());
        self.members.reserve_through(self.borrowings.max_member_ref());

        let issues = crate::services::integrity::scan(self);
        if !issues.is_empty() {
            tracing::warn!(
                count = issues.len(),
                "stored records are inconsistent; run `library check` for details"
            );
        }

        Ok(())
    }

    /// Save all tables to disk.
    ///
    /// Every table is staged before any is replaced, so a failure while
    /// writing leaves the files on disk as they were.
    pub fn save_all(&self) -> Result<(), LibraryError> {
        let results = [
            self.books.stage(),
            self.members.stage(),
            self.borrowings.stage(),
        ];

        let mut staged = Vec::with_capacity(results.len());
        let mut failure = None;
        for result in results {
            match result {
                Ok(file) => staged.push(file),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            discard_staged(staged);
            tracing::error!(error = %e, "save aborted");
            return Err(e);
        }

        commit_staged(staged)?;
        tracing::debug!(
            books = self.books.len(),
            members = self.members.len(),
            borrowings = self.borrowings.len(),
            "saved tables"
        );
        Ok(())
    }

    /// Append an entry to the audit log, if enabled.
    ///
    /// Called after the mutation has been saved, so a failing audit write is
    /// reported but does not fail the operation.
    pub(crate) fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
