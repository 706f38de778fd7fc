//! YAML Export functionality
//!
//! Same snapshot as the JSON export, in a human-readable format.

use crate::error::{LibraryError, LibraryResult};
use crate::export::json::LibrarySnapshot;
use crate::storage::Storage;
use std::io::Write;

/// Export the whole library as YAML
pub fn export_yaml<W: Write>(storage: &Storage, writer: &mut W) -> LibraryResult<()> {
    let snapshot = LibrarySnapshot::from_storage(storage);
    let export_err = |e: std::io::Error| LibraryError::Export(e.to_string());

    writeln!(writer, "# library-cli export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", snapshot.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", snapshot.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| LibraryError::Export(e.to_string()))?;

    Ok(())
}
