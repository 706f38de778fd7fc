//! Borrowing model
//!
//! One loan of a book to a member. Open while `return_date` is `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BookId, BorrowingId, MemberId};

/// Display status derived from the return date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Borrowed,
    Returned,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed => write!(f, "Borrowed"),
            Self::Returned => write!(f, "Returned"),
        }
    }
}

/// A borrow/return record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrowing {
    pub id: BorrowingId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Borrowing {
    /// Open a new borrowing dated `borrow_date`
    pub fn open(
        id: BorrowingId,
        book_id: BookId,
        member_id: MemberId,
        borrow_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            borrow_date,
            return_date: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Close the borrowing
    pub fn close(&mut self, return_date: NaiveDate) {
        self.return_date = Some(return_date);
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_open() {
            LoanStatus::Borrowed
        } else {
            LoanStatus::Returned
        }
    }
}
