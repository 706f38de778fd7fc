//! Book table for CSV storage
//!
//! Manages loading and saving books to books.csv

use serde::{Deserialize, Serialize};

use crate::models::{Book, BookId, BookStatus};

use super::table::{Record, Table};

/// One row of books.csv
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: String,
    pub status: String,
}

impl Record for Book {
    type Id = BookId;
    type Row = BookRow;

    const ENTITY: &'static str = "Book";
    const HEADERS: &'static [&'static str] =
        &["id", "title", "author", "isbn", "published_year", "status"];

    fn id(&self) -> BookId {
        self.id
    }

    fn to_row(&self) -> BookRow {
        BookRow {
            id: self.id.to_string(),
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            published_year: self
                .published_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            status: self.status.to_string(),
        }
    }

    fn from_row(row: BookRow) -> Result<Self, String> {
        let id = row.id.parse::<BookId>().map_err(|e| e.to_string())?;

        // Optional fields degrade instead of failing the load
        let published_year = row.published_year.trim().parse::<i32>().ok();
        let status = row.status.parse::<BookStatus>().unwrap_or_default();

        Ok(Book {
            id,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            published_year,
            status,
        })
    }
}

/// Table of books
pub type BookTable = Table<Book>;

impl Table<Book> {
    /// Find the book holding `isbn`, ignoring the book being edited
    pub fn find_by_isbn(&self, isbn: &str, excluding: Option<BookId>) -> Option<&Book> {
        self.iter()
            .find(|b| Some(b.id) != excluding && b.has_isbn(isbn))
    }

    /// Books that can currently be lent out
    pub fn available(&self) -> Vec<&Book> {
        self.iter().filter(|b| b.is_available()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookDraft;
    use tempfile::TempDir;

    fn book(id: u32, isbn: &str) -> Book {
        Book::new(
            BookId::new(id),
            BookDraft::new("Dune", "Herbert", isbn, "1965")
                .validate(2024)
                .unwrap(),
        )
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.csv");

        let mut table = BookTable::new(path.clone());
        let mut borrowed = book(2, "456");
        borrowed.status = BookStatus::Borrowed;
        table.insert(book(1, "123")).unwrap();
        table.insert(borrowed).unwrap();
        super::super::file_io::commit_staged(vec![table.stage().unwrap()]).unwrap();

        let mut reloaded = BookTable::new(path);
        assert_eq!(reloaded.load().unwrap(), 2);
        assert_eq!(reloaded.all(), table.all());
    }

    #[test]
    fn test_header_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.csv");
        let table = BookTable::new(path.clone());
        super::super::file_io::commit_staged(vec![table.stage().unwrap()]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            contents.trim(),
            "id,title,author,isbn,published_year,status"
        );
    }

    #[test]
    fn test_optional_fields_degrade() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.csv");
        std::fs::write(
            &path,
            "id,title,author,isbn,published_year,status\n\
             1,Dune,Herbert,123,sometime,\n\
             2,Emma,Austen,456\n",
        )
        .unwrap();

        let mut table = BookTable::new(path);
        table.load().unwrap();

        let dune = table.get(BookId::new(1)).unwrap();
        assert_eq!(dune.published_year, None);
        assert_eq!(dune.status, BookStatus::Available);

        let emma = table.get(BookId::new(2)).unwrap();
        assert_eq!(emma.published_year, None);
        assert_eq!(emma.isbn, "456");
    }

    #[test]
    fn test_bad_id_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.csv");
        std::fs::write(
            &path,
            "id,title,author,isbn,published_year,status\nx,Dune,Herbert,123,1965,available\n",
        )
        .unwrap();

        let mut table = BookTable::new(path);
        let err = table.load().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_find_by_isbn() {
        let temp_dir = TempDir::new().unwrap();
        let mut table = BookTable::new(temp_dir.path().join("books.csv"));
        table.insert(book(1, "123")).unwrap();

        assert!(table.find_by_isbn("123", None).is_some());
        assert!(table.find_by_isbn(" 123 ", None).is_some());
        assert!(table.find_by_isbn("123", Some(BookId::new(1))).is_none());
        assert!(table.find_by_isbn("999", None).is_none());
    }

    #[test]
    fn test_loaded_next_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.csv");
        std::fs::write(
            &path,
            "id,title,author,isbn,published_year,status\n7,Dune,Herbert,123,1965,available\n",
        )
        .unwrap();

        let mut table = BookTable::new(path);
        table.load().unwrap();
        assert_eq!(table.next_id(), BookId::new(8));
    }
}
