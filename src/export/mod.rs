//! Export module for library-cli
//!
//! Full snapshots of the library in two formats:
//! - JSON: machine-readable
//! - YAML: human-readable

pub mod json;
pub mod yaml;

pub use json::{export_json, LibrarySnapshot, SnapshotMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
