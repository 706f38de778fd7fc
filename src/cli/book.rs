//! Book CLI commands
//!
//! Implements CLI commands for catalogue management.

use clap::Subcommand;

use crate::display::{format_book_details, format_book_list};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{BookDraft, BookId};
use crate::services::{integrity, BookService};
use crate::storage::Storage;

/// Book subcommands
#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Add a new book
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        #[arg(short, long)]
        isbn: String,
        /// Year of publication
        #[arg(short, long)]
        year: String,
    },
    /// List all books
    List,
    /// List books that can be borrowed
    Available,
    /// Show a book and its borrowing history
    Show {
        /// Book ID
        id: BookId,
    },
    /// Edit a book; omitted fields keep their value
    Update {
        /// Book ID
        id: BookId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        author: Option<String>,
        #[arg(short, long)]
        isbn: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Delete a book that is not on loan
    Delete {
        /// Book ID
        id: BookId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a book command
pub fn handle_book_command(storage: &mut Storage, cmd: BookCommands) -> LibraryResult<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            isbn,
            year,
        } => {
            let book = BookService::new(storage).add(&BookDraft::new(title, author, isbn, year))?;
            println!("Added book {}: {}", book.id, book.title);
        }

        BookCommands::List => {
            println!("{}", format_book_list(storage.books.iter()));
        }

        BookCommands::Available => {
            println!("{}", format_book_list(storage.books.available()));
        }

        BookCommands::Show { id } => {
            let book = storage
                .books
                .get(id)
                .ok_or_else(|| LibraryError::book_not_found(id.to_string()))?;
            print!(
                "{}",
                format_book_details(book, &storage.borrowings.for_book(id))
            );
        }

        BookCommands::Update {
            id,
            title,
            author,
            isbn,
            year,
        } => {
            if title.is_none() && author.is_none() && isbn.is_none() && year.is_none() {
                return Err(LibraryError::Validation(
                    "Nothing to update; pass at least one field".into(),
                ));
            }

            let mut service = BookService::new(storage);
            let mut draft = BookDraft::from_book(service.get(id)?);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(author) = author {
                draft.author = author;
            }
            if let Some(isbn) = isbn {
                draft.isbn = isbn;
            }
            if let Some(year) = year {
                draft.published_year = year;
            }

            let book = service.update(id, &draft)?;
            println!("Updated book {}: {}", book.id, book.title);
        }

        BookCommands::Delete { id, force } => {
            if !force {
                let book = storage
                    .books
                    .get(id)
                    .ok_or_else(|| LibraryError::book_not_found(id.to_string()))?;
                integrity::ensure_book_deletable(storage, id)?;
                println!(
                    "This will permanently delete book {}: {} by {}",
                    book.id, book.title, book.author
                );
                println!("To proceed, run again with --force flag:");
                println!("  library book delete {} --force", id);
                return Ok(());
            }

            let book = BookService::new(storage).delete(id)?;
            println!("Deleted book {}: {}", book.id, book.title);
        }
    }

    Ok(())
}
