//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. The same [`Command`] enum
//! drives both the `library` binary and the interactive shell.

pub mod book;
pub mod circulation;
pub mod maintenance;
pub mod member;
pub mod shell;

use std::path::PathBuf;

use clap::Subcommand;

pub use book::{handle_book_command, BookCommands};
pub use circulation::OptionList;
pub use maintenance::ExportFormat;
pub use member::{handle_member_command, MemberCommands};
pub use shell::{run_shell, ShellArgs};

use crate::config::Settings;
use crate::error::LibraryResult;
use crate::models::{BookId, BorrowingId, MemberId};
use crate::storage::Storage;

/// Library commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Book management commands
    #[command(subcommand)]
    Book(BookCommands),

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Lend a book to a member
    Borrow {
        /// Book ID
        book: BookId,
        /// Member ID
        member: MemberId,
    },

    /// Return a borrowed book
    Return {
        /// Borrowing ID
        borrowing: BorrowingId,
    },

    /// List open borrowings
    Loans,

    /// List every borrowing, newest first
    History,

    /// Print selector options as "<id> - <label>" lines
    Options {
        #[arg(value_enum)]
        list: OptionList,
    },

    /// Check stored records for inconsistencies
    Check {
        /// Rewrite book statuses from the open borrowings
        #[arg(long)]
        repair: bool,
    },

    /// Export all records
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,

    /// Start the interactive shell (login required)
    Shell(ShellArgs),
}

/// Run one command against loaded storage
pub fn execute(storage: &mut Storage, settings: &Settings, command: Command) -> LibraryResult<()> {
    tracing::debug!(?command, "executing command");

    match command {
        Command::Book(cmd) => handle_book_command(storage, cmd)?,
        Command::Member(cmd) => handle_member_command(storage, cmd)?,
        Command::Borrow { book, member } => circulation::handle_borrow(storage, book, member)?,
        Command::Return { borrowing } => circulation::handle_return(storage, borrowing)?,
        Command::Loans => circulation::handle_loans(storage),
        Command::History => circulation::handle_history(storage),
        Command::Options { list } => circulation::handle_options(storage, list),
        Command::Check { repair } => maintenance::handle_check(storage, repair)?,
        Command::Export { format, output } => maintenance::handle_export(storage, format, output)?,
        Command::Audit { limit } => maintenance::handle_audit(storage, limit)?,
        Command::Config => maintenance::handle_config(storage, settings),
        Command::Shell(args) => shell::handle_shell(storage, settings, args)?,
    }

    Ok(())
}
