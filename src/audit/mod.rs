//! Audit logging system for library-cli
//!
//! Records every create, update, delete, borrow and return with before/after
//! snapshots in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one log entry with timestamp, operation, entity information,
//!   and optional before/after values.
//! - `AuditLogger`: appends entries to the log file as JSON lines (JSONL).
//! - `generate_diff`: human-readable summary of the fields that changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use library::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(EntityType::Book, "1", Some("Dune".into()), &book);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{changed_fields, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
