//! Generic in-memory table backed by one CSV file
//!
//! Each table keeps its records in file order and owns id assignment for its
//! collection. Mutation is crate-private: the service layer is the only way
//! records change, so cross-table invariants are enforced in one place.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LibraryError, LibraryResult};
use crate::models::{BookId, BorrowingId, MemberId};

use super::file_io::{read_csv_rows, stage_csv, StagedFile};

/// An id type that can be handed out sequentially
pub trait RecordId: Copy + Ord + fmt::Debug + fmt::Display {
    const FIRST: Self;
    fn successor(self) -> Self;
}

macro_rules! impl_record_id {
    ($($name:ty),*) => {
        $(
            impl RecordId for $name {
                const FIRST: Self = <$name>::FIRST;

                fn successor(self) -> Self {
                    self.next()
                }
            }
        )*
    };
}

impl_record_id!(BookId, MemberId, BorrowingId);

/// A record type stored in its own CSV table
pub trait Record: Clone + fmt::Debug {
    type Id: RecordId;
    /// Flat, string-typed CSV row
    type Row: Serialize + DeserializeOwned;

    /// Entity name used in messages ("Book")
    const ENTITY: &'static str;
    /// Column headers, in row field order
    const HEADERS: &'static [&'static str];

    fn id(&self) -> Self::Id;
    fn to_row(&self) -> Self::Row;
    /// Parse a stored row; `Err` names the field that could not be parsed
    fn from_row(row: Self::Row) -> Result<Self, String>;
}

/// In-memory collection of one record type
#[derive(Debug)]
pub struct Table<R: Record> {
    path: PathBuf,
    records: Vec<R>,
    /// Lowest id that may still be handed out
    next_id: R::Id,
}

impl<R: Record> Table<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
            next_id: R::Id::FIRST,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory records with the contents of the CSV file.
    ///
    /// Returns the number of records loaded. A missing file loads as empty.
    pub fn load(&mut self) -> LibraryResult<usize> {
        let rows = read_csv_rows::<R::Row, _>(&self.path)?;
        let file_name = self.path.display().to_string();

        let mut records: Vec<R> = Vec::with_capacity(rows.len());
        for entry in rows {
            let record = entry.row.and_then(R::from_row).map_err(|reason| {
                LibraryError::Storage(format!("{} line {}: {}", file_name, entry.line, reason))
            })?;

            if records.iter().any(|r| r.id() == record.id()) {
                return Err(LibraryError::Storage(format!(
                    "{} line {}: duplicate {} id {}",
                    file_name,
                    entry.line,
                    R::ENTITY,
                    record.id()
                )));
            }
            records.push(record);
        }

        self.records = records;
        self.next_id = R::Id::FIRST;
        self.reserve_through(self.max_id());

        tracing::debug!(
            table = R::ENTITY,
            path = %file_name,
            count = self.records.len(),
            "loaded table"
        );

        Ok(self.records.len())
    }

    /// Write the table to a temp file, ready for an atomic commit
    pub fn stage(&self) -> LibraryResult<StagedFile> {
        let rows: Vec<R::Row> = self.records.iter().map(R::to_row).collect();
        stage_csv(&self.path, R::HEADERS, &rows)
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: R::Id) -> bool {
        self.get(id).is_some()
    }

    /// All records in insertion order
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_id(&self) -> Option<R::Id> {
        self.records.iter().map(R::id).max()
    }

    /// The id the next inserted record will receive: `max(ids) + 1`, or the
    /// first id for an empty table. Ids freed by deletion are not handed out
    /// again.
    pub fn next_id(&self) -> R::Id {
        self.next_id
    }

    /// Keep `id` and everything below it from being handed out
    pub(crate) fn reserve_through(&mut self, id: Option<R::Id>) {
        if let Some(id) = id {
            let candidate = id.successor();
            if candidate > self.next_id {
                self.next_id = candidate;
            }
        }
    }

    pub(crate) fn insert(&mut self, record: R) -> LibraryResult<()> {
        if self.contains(record.id()) {
            return Err(LibraryError::Inconsistent(format!(
                "{} id {} is already in use",
                R::ENTITY,
                record.id()
            )));
        }
        self.reserve_through(Some(record.id()));
        self.records.push(record);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: R::Id) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub(crate) fn remove(&mut self, id: R::Id) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }
}
