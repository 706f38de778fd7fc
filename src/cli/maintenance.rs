//! Maintenance commands: integrity check, export, audit log and configuration

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::display::format_integrity_report;
use crate::error::{LibraryError, LibraryResult};
use crate::export::{export_json, export_yaml};
use crate::services::integrity;
use crate::storage::Storage;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

/// Report integrity issues, optionally repairing book statuses
pub fn handle_check(storage: &mut Storage, repair: bool) -> LibraryResult<()> {
    let issues = integrity::scan(storage);
    println!("{}", format_integrity_report(&issues));

    if repair && issues.iter().any(|i| i.is_repairable()) {
        let fixed = integrity::repair_statuses(storage)?;
        println!("Repaired {} book status(es).", fixed);

        let remaining = integrity::scan(storage);
        if !remaining.is_empty() {
            println!("{}", format_integrity_report(&remaining));
        }
    }
    Ok(())
}

pub fn handle_export(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> LibraryResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                LibraryError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LibraryError::Export(e.to_string()))?;
            println!("Exported library to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, format, &mut writer)?;
        }
    }
    Ok(())
}

fn write_export<W: Write>(storage: &Storage, format: ExportFormat, writer: &mut W) -> LibraryResult<()> {
    match format {
        ExportFormat::Json => export_json(storage, writer, true),
        ExportFormat::Yaml => export_yaml(storage, writer),
    }
}

/// Print the most recent audit entries, oldest first
pub fn handle_audit(storage: &Storage, limit: usize) -> LibraryResult<()> {
    let logger = AuditLogger::new(storage.paths().audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

pub fn handle_config(storage: &Storage, settings: &Settings) {
    let paths = storage.paths();

    println!("library-cli Configuration");
    println!("=========================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Books file:      {}", paths.books_file().display());
    println!("Members file:    {}", paths.members_file().display());
    println!("Borrowings file: {}", paths.borrowings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Schema version: {}", settings.schema_version);
    println!("  Shell user:     {}", settings.credentials.username);
    println!("  Audit enabled:  {}", settings.audit_enabled);
}
