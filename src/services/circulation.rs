//! Circulation service
//!
//! Lending books out and taking them back. A book is available exactly when
//! no open borrowing references it; borrow and return are the only
//! operations that move a book between the two states.

use chrono::{Local, NaiveDate};

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookId, BookStatus, Borrowing, BorrowingId, LoanStatus, Member, MemberId};
use crate::storage::Storage;

/// A borrowing joined with the book and member it references
#[derive(Debug, Clone, Copy)]
pub struct LoanView<'s> {
    pub borrowing: &'s Borrowing,
    pub book: &'s Book,
    pub member: &'s Member,
}

impl<'s> LoanView<'s> {
    /// Join a borrowing; `None` when its book or member no longer exists
    pub fn join(storage: &'s Storage, borrowing: &'s Borrowing) -> Option<Self> {
        Some(Self {
            borrowing,
            book: storage.books.get(borrowing.book_id)?,
            member: storage.members.get(borrowing.member_id)?,
        })
    }

    pub fn status(&self) -> LoanStatus {
        self.borrowing.status()
    }

    /// Label used in selector lists
    pub fn option_label(&self) -> String {
        format!(
            "{} - {} (by {})",
            self.borrowing.id, self.book.title, self.member.name
        )
    }
}

/// Open borrowings, joined. Rows with a missing book or member are left out.
pub fn open_loans(storage: &Storage) -> Vec<LoanView<'_>> {
    storage
        .borrowings
        .open()
        .filter_map(|b| LoanView::join(storage, b))
        .collect()
}

/// Every joinable borrowing, newest borrow date first.
///
/// Borrowings sharing a date keep their stored order.
pub fn history(storage: &Storage) -> Vec<LoanView<'_>> {
    let mut loans: Vec<LoanView<'_>> = storage
        .borrowings
        .iter()
        .filter_map(|b| LoanView::join(storage, b))
        .collect();
    loans.sort_by(|a, b| b.borrowing.borrow_date.cmp(&a.borrowing.borrow_date));
    loans
}

/// Books that can be lent out, as `"<id> - <title> by <author> (ISBN: <isbn>)"`
pub fn book_options(storage: &Storage) -> Vec<String> {
    storage
        .books
        .available()
        .into_iter()
        .map(Book::option_label)
        .collect()
}

/// All members, as `"<id> - <name> (<email>)"`
pub fn member_options(storage: &Storage) -> Vec<String> {
    storage.members.iter().map(Member::option_label).collect()
}

/// Open borrowings, as `"<id> - <title> (by <name>)"`
pub fn loan_options(storage: &Storage) -> Vec<String> {
    open_loans(storage)
        .iter()
        .map(LoanView::option_label)
        .collect()
}

/// Service for borrowing and returning books
pub struct CirculationService<'a> {
    storage: &'a mut Storage,
    today: NaiveDate,
}

impl<'a> CirculationService<'a> {
    /// Create a new circulation service dated today
    pub fn new(storage: &'a mut Storage) -> Self {
        Self {
            storage,
            today: Local::now().date_naive(),
        }
    }

    /// Date borrowings and returns as `today`
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Lend a book to a member
    pub fn borrow(&mut self, book_id: BookId, member_id: MemberId) -> LibraryResult<Borrowing> {
        let book = self
            .storage
            .books
            .get(book_id)
            .ok_or_else(|| LibraryError::book_not_found(book_id.to_string()))?;
        let member = self
            .storage
            .members
            .get(member_id)
            .ok_or_else(|| LibraryError::member_not_found(member_id.to_string()))?;

        if !book.is_available() {
            return Err(LibraryError::AlreadyBorrowed {
                title: book.title.clone(),
            });
        }
        if let Some(open) = self.storage.borrowings.open_for_book(book_id).first() {
            return Err(LibraryError::Inconsistent(format!(
                "book {} is marked available but borrowing {} is still open",
                book_id, open.id
            )));
        }

        let label = format!("{} -> {}", book.title, member.name);
        let borrowing = Borrowing::open(
            self.storage.borrowings.next_id(),
            book_id,
            member_id,
            self.today,
        );

        self.storage.borrowings.insert(borrowing.clone())?;
        if let Some(book) = self.storage.books.get_mut(book_id) {
            book.status = BookStatus::Borrowed;
        }
        self.storage.save_all()?;

        self.storage
            .record(AuditEntry::borrow(borrowing.id.to_string(), Some(label), &borrowing));
        tracing::info!(
            borrowing_id = %borrowing.id,
            book_id = %book_id,
            member_id = %member_id,
            "book borrowed"
        );

        Ok(borrowing)
    }

    /// Close an open borrowing and put its book back on the shelf
    pub fn return_book(&mut self, borrowing_id: BorrowingId) -> LibraryResult<Borrowing> {
        let before = self
            .storage
            .borrowings
            .get(borrowing_id)
            .ok_or_else(|| LibraryError::borrowing_not_found(borrowing_id.to_string()))?
            .clone();

        if !before.is_open() {
            return Err(LibraryError::AlreadyReturned(borrowing_id.to_string()));
        }
        let title = self
            .storage
            .books
            .get(before.book_id)
            .map(|b| b.title.clone())
            .ok_or_else(|| {
                LibraryError::Inconsistent(format!(
                    "book {} of borrowing {} no longer exists",
                    before.book_id, borrowing_id
                ))
            })?;

        let borrowing = self
            .storage
            .borrowings
            .get_mut(borrowing_id)
            .ok_or_else(|| LibraryError::borrowing_not_found(borrowing_id.to_string()))?;
        borrowing.close(self.today);
        let after = borrowing.clone();

        let still_open = !self.storage.borrowings.open_for_book(after.book_id).is_empty();
        if let Some(book) = self.storage.books.get_mut(after.book_id) {
            book.status = if still_open {
                BookStatus::Borrowed
            } else {
                BookStatus::Available
            };
        }
        self.storage.save_all()?;

        self.storage.record(AuditEntry::change(
            Operation::Return,
            EntityType::Borrowing,
            borrowing_id.to_string(),
            Some(title),
            &before,
            &after,
        ));
        tracing::info!(borrowing_id = %borrowing_id, book_id = %after.book_id, "book returned");

        Ok(after)
    }

    pub fn open_loans(&self) -> Vec<LoanView<'_>> {
        open_loans(self.storage)
    }

    pub fn history(&self) -> Vec<LoanView<'_>> {
        history(self.storage)
    }
}
