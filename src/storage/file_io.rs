//! File I/O utilities with atomic writes
//!
//! Provides safe CSV file operations that won't corrupt data on failure.
//! Writes are split into a staging step (write + sync a temp file next to the
//! target) and a commit step (rename), so several tables can be staged first
//! and swapped in together.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LibraryError;

/// A fully written temp file waiting to replace its target
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }
}

/// One parsed data row, or the reason it could not be decoded
pub struct CsvRow<T> {
    /// 1-based line number in the file (the header is line 1)
    pub line: usize,
    pub row: Result<T, String>,
}

/// Read every data row of a CSV table, returning no rows if the file doesn't exist.
///
/// Columns are matched by header name, so missing optional columns fall back to
/// the row type's serde defaults. A row shorter than the header reads its
/// missing trailing fields as empty. A row that cannot be decoded is returned
/// as an error entry rather than aborting the read.
pub fn read_csv_rows<T, P>(path: P) -> Result<Vec<CsvRow<T>>, LibraryError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| LibraryError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));

    // Surface an unreadable header as a storage error up front
    let headers = reader
        .headers()
        .map_err(|e| LibraryError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?
        .clone();

    let rows = reader
        .records()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(mut record) => {
                let line = record
                    .position()
                    .map_or(index + 2, |pos| pos.line() as usize);
                while record.len() < headers.len() {
                    record.push_field("");
                }
                CsvRow {
                    line,
                    row: record
                        .deserialize::<T>(Some(&headers))
                        .map_err(|e| e.to_string()),
                }
            }
            Err(e) => CsvRow {
                line: index + 2,
                row: Err(e.to_string()),
            },
        })
        .collect();

    Ok(rows)
}

/// Write a CSV table to a temp file beside `path`, ready to be committed.
///
/// The header row is always written, even for an empty table.
pub fn stage_csv<T, P>(path: P, headers: &[&str], rows: &[T]) -> Result<StagedFile, LibraryError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LibraryError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LibraryError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    let result = write_table(&mut writer, headers, rows).and_then(|_| {
        let inner = writer
            .into_inner()
            .map_err(|e| LibraryError::Storage(format!("Failed to flush data: {}", e)))?;
        let mut file = inner
            .into_inner()
            .map_err(|e| LibraryError::Storage(format!("Failed to flush data: {}", e)))?;
        file.flush()
            .map_err(|e| LibraryError::Storage(format!("Failed to flush data: {}", e)))?;
        // Sync to disk before rename
        file.sync_all()
            .map_err(|e| LibraryError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(StagedFile {
        temp_path,
        path: path.to_path_buf(),
    })
}

fn write_table<W, T>(
    writer: &mut csv::Writer<W>,
    headers: &[&str],
    rows: &[T],
) -> Result<(), LibraryError>
where
    W: Write,
    T: Serialize,
{
    writer.write_record(headers)?;

    for row in rows {
        writer.serialize(row)?;
    }

    Ok(())
}

/// Rename every staged file over its target.
///
/// All files must already be staged, so a failure while staging leaves every
/// table untouched.
pub fn commit_staged(files: Vec<StagedFile>) -> Result<(), LibraryError> {
    let mut pending = files.into_iter();

    while let Some(file) = pending.next() {
        if let Err(e) = fs::rename(&file.temp_path, &file.path) {
            let _ = fs::remove_file(&file.temp_path);
            discard_staged(pending.collect());
            return Err(LibraryError::Storage(format!(
                "Failed to replace {}: {}",
                file.path.display(),
                e
            )));
        }
    }

    Ok(())
}

/// Remove staged temp files without committing them
pub fn discard_staged(files: Vec<StagedFile>) {
    for file in files {
        let _ = fs::remove_file(&file.temp_path);
    }
}
