//! Book service
//!
//! Catalogue management: adding, editing and deleting books with
//! validation, ISBN uniqueness and the open-borrowing delete guard.

use chrono::{Datelike, Local, NaiveDate};

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookDraft, BookId};
use crate::storage::Storage;

use super::integrity;

/// Service for book management
pub struct BookService<'a> {
    storage: &'a mut Storage,
    today: NaiveDate,
}

impl<'a> BookService<'a> {
    /// Create a new book service dated today
    pub fn new(storage: &'a mut Storage) -> Self {
        Self {
            storage,
            today: Local::now().date_naive(),
        }
    }

    /// Evaluate date-dependent rules as of `today`
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Add a new book; it starts out available
    pub fn add(&mut self, draft: &BookDraft) -> LibraryResult<Book> {
        let fields = draft
            .validate(self.today.year())
            .map_err(|e| LibraryError::Validation(e.to_string()))?;
        integrity::ensure_isbn_unique(self.storage, &fields.isbn, None)?;

        let book = Book::new(self.storage.books.next_id(), fields);
        self.storage.books.insert(book.clone())?;
        self.storage.save_all()?;

        self.storage.record(AuditEntry::create(
            EntityType::Book,
            book.id.to_string(),
            Some(book.title.clone()),
            &book,
        ));
        tracing::info!(book_id = %book.id, isbn = %book.isbn, "added book");

        Ok(book)
    }

    /// Replace the editable fields of a book; id and status are kept
    pub fn update(&mut self, id: BookId, draft: &BookDraft) -> LibraryResult<Book> {
        let before = self.get(id)?.clone();
        let fields = draft
            .validate(self.today.year())
            .map_err(|e| LibraryError::Validation(e.to_string()))?;
        integrity::ensure_isbn_unique(self.storage, &fields.isbn, Some(id))?;

        let book = self
            .storage
            .books
            .get_mut(id)
            .ok_or_else(|| LibraryError::book_not_found(id.to_string()))?;
        book.apply(fields);
        let after = book.clone();
        self.storage.save_all()?;

        self.storage.record(AuditEntry::change(
            Operation::Update,
            EntityType::Book,
            id.to_string(),
            Some(after.title.clone()),
            &before,
            &after,
        ));
        tracing::info!(book_id = %id, "updated book");

        Ok(after)
    }

    /// Delete a book that is not out on loan.
    ///
    /// Closed borrowings keep referring to the deleted id.
    pub fn delete(&mut self, id: BookId) -> LibraryResult<Book> {
        self.get(id)?;
        integrity::ensure_book_deletable(self.storage, id)?;

        let book = self
            .storage
            .books
            .remove(id)
            .ok_or_else(|| LibraryError::book_not_found(id.to_string()))?;
        self.storage.save_all()?;

        self.storage.record(AuditEntry::delete(
            EntityType::Book,
            id.to_string(),
            Some(book.title.clone()),
            &book,
        ));
        tracing::info!(book_id = %id, "deleted book");

        Ok(book)
    }

    pub fn get(&self, id: BookId) -> LibraryResult<&Book> {
        self.storage
            .books
            .get(id)
            .ok_or_else(|| LibraryError::book_not_found(id.to_string()))
    }

    /// All books in storage order
    pub fn list(&self) -> &[Book] {
        self.storage.books.all()
    }

    pub fn available(&self) -> Vec<&Book> {
        self.storage.books.available()
    }
}
