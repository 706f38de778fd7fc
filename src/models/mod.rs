//! Core data models for library-cli
//!
//! This module contains the record types of the library domain: books,
//! members and the borrowings linking them.

pub mod book;
pub mod borrowing;
pub mod ids;
pub mod member;

pub use book::{Book, BookDraft, BookFields, BookStatus, BookValidationError};
pub use borrowing::{Borrowing, LoanStatus};
pub use ids::{BookId, BorrowingId, InvalidId, MemberId};
pub use member::{Member, MemberDraft, MemberFields, MemberValidationError};
