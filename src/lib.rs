//! library-cli - Terminal-based management of a small library
//!
//! This library provides the core functionality for tracking a library's
//! books, members and the borrowings linking them. Records live in three CSV
//! tables that are rewritten in full after every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (books, members, borrowings)
//! - `storage`: CSV table storage layer
//! - `services`: Business logic layer (validation, integrity, borrow/return)
//! - `audit`: Audit logging system
//! - `auth`: Login gate for the interactive shell
//! - `cli`: Command handlers and the interactive shell
//! - `display`: Terminal formatting
//! - `export`: JSON/YAML snapshots
//! - `logging`: Diagnostic log setup
//!
//! # Example
//!
//! ```rust,ignore
//! use library::config::LibraryPaths;
//! use library::models::BookDraft;
//! use library::services::BookService;
//! use library::storage::Storage;
//!
//! let mut storage = Storage::new(LibraryPaths::new()?)?;
//! storage.load_all()?;
//! let book = BookService::new(&mut storage)
//!     .add(&BookDraft::new("Dune", "Frank Herbert", "9780441013593", "1965"))?;
//! ```

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LibraryError, LibraryResult};
