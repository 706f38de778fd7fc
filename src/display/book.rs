//! Book display formatting
//!
//! Formats books for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Book, Borrowing};

use super::or_na;

#[derive(Tabled)]
struct BookLine {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "ISBN")]
    isbn: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Book> for BookLine {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.get(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            year: or_na(book.published_year),
            status: book.status.to_string(),
        }
    }
}

/// Format a list of books as a table
pub fn format_book_list<'b>(books: impl IntoIterator<Item = &'b Book>) -> String {
    let lines: Vec<BookLine> = books.into_iter().map(BookLine::from).collect();
    if lines.is_empty() {
        return "No books found.".to_string();
    }

    Table::new(lines).with(Style::psql()).to_string()
}

/// Format a single book with its borrowing history
pub fn format_book_details(book: &Book, borrowings: &[&Borrowing]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Book: {}\n", book.title));
    output.push_str(&format!("  ID:        {}\n", book.id));
    output.push_str(&format!("  Author:    {}\n", book.author));
    output.push_str(&format!("  ISBN:      {}\n", book.isbn));
    output.push_str(&format!("  Published: {}\n", or_na(book.published_year)));
    output.push_str(&format!("  Status:    {}\n", book.status));

    output.push('\n');
    if borrowings.is_empty() {
        output.push_str("  Never borrowed.\n");
    } else {
        output.push_str("  Borrowings:\n");
        for borrowing in borrowings {
            output.push_str(&format!(
                "    #{}  member {}  {} -> {}\n",
                borrowing.id,
                borrowing.member_id,
                borrowing.borrow_date,
                or_na(borrowing.return_date)
            ));
        }
    }

    output
}
