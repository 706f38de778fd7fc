//! Integrity rules
//!
//! Uniqueness and referential-integrity checks that gate mutations, plus a
//! consistency scan over the stored records.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{BookId, BookStatus, BorrowingId, MemberId};
use crate::storage::Storage;

/// Reject an isbn already used by another book
pub fn ensure_isbn_unique(
    storage: &Storage,
    isbn: &str,
    excluding: Option<BookId>,
) -> LibraryResult<()> {
    match storage.books.find_by_isbn(isbn, excluding) {
        Some(_) => Err(LibraryError::Duplicate {
            entity_type: "Book",
            field: "ISBN",
            value: isbn.trim().to_string(),
        }),
        None => Ok(()),
    }
}

/// Reject an email (compared case-insensitively) already used by another member
pub fn ensure_email_unique(
    storage: &Storage,
    email: &str,
    excluding: Option<MemberId>,
) -> LibraryResult<()> {
    match storage.members.find_by_email(email, excluding) {
        Some(_) => Err(LibraryError::Duplicate {
            entity_type: "Member",
            field: "email",
            value: email.trim().to_string(),
        }),
        None => Ok(()),
    }
}

/// A book may be deleted only while no open borrowing references it
pub fn ensure_book_deletable(storage: &Storage, id: BookId) -> LibraryResult<()> {
    let open = storage.borrowings.open_for_book(id).len();
    if open > 0 {
        return Err(LibraryError::Referenced {
            entity_type: "Book",
            identifier: id.to_string(),
            open_borrowings: open,
        });
    }
    Ok(())
}

/// A member may be deleted only while they hold no open borrowing
pub fn ensure_member_deletable(storage: &Storage, id: MemberId) -> LibraryResult<()> {
    let open = storage.borrowings.open_for_member(id).len();
    if open > 0 {
        return Err(LibraryError::Referenced {
            entity_type: "Member",
            identifier: id.to_string(),
            open_borrowings: open,
        });
    }
    Ok(())
}

/// A disagreement between stored records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Book status does not match whether an open borrowing exists
    StatusMismatch {
        book_id: BookId,
        stored: BookStatus,
        expected: BookStatus,
    },
    /// More than one open borrowing for the same book
    MultipleOpenBorrowings {
        book_id: BookId,
        borrowings: Vec<BorrowingId>,
    },
    MissingBook {
        borrowing_id: BorrowingId,
        book_id: BookId,
        open: bool,
    },
    MissingMember {
        borrowing_id: BorrowingId,
        member_id: MemberId,
        open: bool,
    },
}

impl IntegrityIssue {
    /// Whether `repair_statuses` can fix this issue
    pub fn is_repairable(&self) -> bool {
        matches!(self, Self::StatusMismatch { .. })
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusMismatch {
                book_id,
                stored,
                expected,
            } => write!(
                f,
                "Book {} is marked {} but should be {}",
                book_id, stored, expected
            ),
            Self::MultipleOpenBorrowings {
                book_id,
                borrowings,
            } => {
                let ids: Vec<String> = borrowings.iter().map(|id| id.to_string()).collect();
                write!(
                    f,
                    "Book {} has {} open borrowings ({})",
                    book_id,
                    borrowings.len(),
                    ids.join(", ")
                )
            }
            Self::MissingBook {
                borrowing_id,
                book_id,
                open,
            } => write!(
                f,
                "{} borrowing {} references missing book {}",
                if *open { "Open" } else { "Closed" },
                borrowing_id,
                book_id
            ),
            Self::MissingMember {
                borrowing_id,
                member_id,
                open,
            } => write!(
                f,
                "{} borrowing {} references missing member {}",
                if *open { "Open" } else { "Closed" },
                borrowing_id,
                member_id
            ),
        }
    }
}

/// Status a book should carry given the open borrowings
fn expected_status(storage: &Storage, book_id: BookId) -> BookStatus {
    if storage.borrowings.open_for_book(book_id).is_empty() {
        BookStatus::Available
    } else {
        BookStatus::Borrowed
    }
}

/// Find every disagreement between the stored records
pub fn scan(storage: &Storage) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for book in storage.books.iter() {
        let expected = expected_status(storage, book.id);
        if book.status != expected {
            issues.push(IntegrityIssue::StatusMismatch {
                book_id: book.id,
                stored: book.status,
                expected,
            });
        }
    }

    let mut open_by_book: BTreeMap<BookId, Vec<BorrowingId>> = BTreeMap::new();
    for borrowing in storage.borrowings.open() {
        open_by_book
            .entry(borrowing.book_id)
            .or_default()
            .push(borrowing.id);
    }
    issues.extend(
        open_by_book
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(book_id, borrowings)| IntegrityIssue::MultipleOpenBorrowings {
                book_id,
                borrowings,
            }),
    );

    for borrowing in storage.borrowings.iter() {
        if !storage.books.contains(borrowing.book_id) {
            issues.push(IntegrityIssue::MissingBook {
                borrowing_id: borrowing.id,
                book_id: borrowing.book_id,
                open: borrowing.is_open(),
            });
        }
        if !storage.members.contains(borrowing.member_id) {
            issues.push(IntegrityIssue::MissingMember {
                borrowing_id: borrowing.id,
                member_id: borrowing.member_id,
                open: borrowing.is_open(),
            });
        }
    }

    issues
}

/// Rewrite every book status from the open borrowings and persist.
///
/// Returns the number of books changed.
pub fn repair_statuses(storage: &mut Storage) -> LibraryResult<usize> {
    let current: &Storage = storage;
    let fixes: Vec<(BookId, BookStatus)> = current
        .books
        .iter()
        .filter_map(|book| {
            let expected = expected_status(current, book.id);
            (book.status != expected).then_some((book.id, expected))
        })
        .collect();

    if fixes.is_empty() {
        return Ok(0);
    }

    for (id, status) in &fixes {
        if let Some(book) = storage.books.get_mut(*id) {
            tracing::info!(book_id = %id, status = %status, "repairing book status");
            book.status = *status;
        }
    }

    storage.save_all()?;
    Ok(fixes.len())
}
