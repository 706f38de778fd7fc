//! Loan display formatting
//!
//! Open borrowings and the full borrowing history.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::LoanView;

use super::or_na;

#[derive(Tabled)]
struct LoanLine {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Borrowed")]
    borrow_date: String,
    #[tabled(rename = "Returned")]
    return_date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&LoanView<'_>> for LoanLine {
    fn from(loan: &LoanView<'_>) -> Self {
        Self {
            id: loan.borrowing.id.get(),
            book: loan.book.title.clone(),
            member: loan.member.name.clone(),
            borrow_date: loan.borrowing.borrow_date.to_string(),
            return_date: or_na(loan.borrowing.return_date),
            status: loan.status().to_string(),
        }
    }
}

/// History rows also carry the identifying isbn and email
#[derive(Tabled)]
struct HistoryLine {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "ISBN")]
    isbn: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Borrowed")]
    borrow_date: String,
    #[tabled(rename = "Returned")]
    return_date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&LoanView<'_>> for HistoryLine {
    fn from(loan: &LoanView<'_>) -> Self {
        Self {
            id: loan.borrowing.id.get(),
            book: loan.book.title.clone(),
            isbn: loan.book.isbn.clone(),
            member: loan.member.name.clone(),
            email: loan.member.email.clone(),
            borrow_date: loan.borrowing.borrow_date.to_string(),
            return_date: or_na(loan.borrowing.return_date),
            status: loan.status().to_string(),
        }
    }
}

fn format_table<'v, L>(loans: &'v [LoanView<'v>], empty: &str) -> String
where
    L: Tabled + From<&'v LoanView<'v>>,
{
    if loans.is_empty() {
        return empty.to_string();
    }
    let lines: Vec<L> = loans.iter().map(L::from).collect();
    Table::new(lines).with(Style::psql()).to_string()
}

/// Format the open borrowings
pub fn format_open_loans(loans: &[LoanView<'_>]) -> String {
    format_table::<LoanLine>(loans, "No books are currently borrowed.")
}

/// Format the borrowing history
pub fn format_history(loans: &[LoanView<'_>]) -> String {
    format_table::<HistoryLine>(loans, "No borrowings recorded.")
}
