//! Borrow/return CLI commands

use clap::ValueEnum;

use crate::display::{format_history, format_open_loans};
use crate::error::LibraryResult;
use crate::models::{BookId, BorrowingId, MemberId};
use crate::services::circulation::{self, CirculationService};
use crate::storage::Storage;

/// Which selector list to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionList {
    /// Books available for borrowing
    Books,
    /// All members
    Members,
    /// Open borrowings
    Loans,
}

pub fn handle_borrow(storage: &mut Storage, book: BookId, member: MemberId) -> LibraryResult<()> {
    let borrowing = CirculationService::new(storage).borrow(book, member)?;
    println!(
        "Borrowing {} opened: book {} lent to member {} on {}",
        borrowing.id, borrowing.book_id, borrowing.member_id, borrowing.borrow_date
    );
    Ok(())
}

pub fn handle_return(storage: &mut Storage, borrowing: BorrowingId) -> LibraryResult<()> {
    let borrowing = CirculationService::new(storage).return_book(borrowing)?;
    println!(
        "Borrowing {} closed: book {} returned on {}",
        borrowing.id,
        borrowing.book_id,
        crate::display::or_na(borrowing.return_date)
    );
    Ok(())
}

pub fn handle_loans(storage: &Storage) {
    println!("{}", format_open_loans(&circulation::open_loans(storage)));
}

pub fn handle_history(storage: &Storage) {
    println!("{}", format_history(&circulation::history(storage)));
}

/// Print one `"<id> - <label>"` line per option
pub fn handle_options(storage: &Storage, list: OptionList) {
    let options = match list {
        OptionList::Books => circulation::book_options(storage),
        OptionList::Members => circulation::member_options(storage),
        OptionList::Loans => circulation::loan_options(storage),
    };
    for option in options {
        println!("{}", option);
    }
}
