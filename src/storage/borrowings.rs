//! Borrowing table for CSV storage
//!
//! Manages loading and saving borrowings to borrowings.csv. Dates are stored
//! as `YYYY-MM-DD`; an empty (or legacy `None`) return date marks an open loan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BookId, Borrowing, BorrowingId, MemberId};

use super::table::{Record, Table};

/// Date format used in the borrowings table
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of borrowings.csv
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BorrowingRow {
    pub id: String,
    pub book_id: String,
    pub member_id: String,
    pub borrow_date: String,
    pub return_date: String,
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid {} '{}'", field, raw))
}

impl Record for Borrowing {
    type Id = BorrowingId;
    type Row = BorrowingRow;

    const ENTITY: &'static str = "Borrowing";
    const HEADERS: &'static [&'static str] =
        &["id", "book_id", "member_id", "borrow_date", "return_date"];

    fn id(&self) -> BorrowingId {
        self.id
    }

    fn to_row(&self) -> BorrowingRow {
        BorrowingRow {
            id: self.id.to_string(),
            book_id: self.book_id.to_string(),
            member_id: self.member_id.to_string(),
            borrow_date: self.borrow_date.format(DATE_FORMAT).to_string(),
            return_date: self
                .return_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    fn from_row(row: BorrowingRow) -> Result<Self, String> {
        let id = row.id.parse::<BorrowingId>().map_err(|e| e.to_string())?;
        let book_id = row
            .book_id
            .parse::<BookId>()
            .map_err(|e| format!("book_id: {}", e))?;
        let member_id = row
            .member_id
            .parse::<MemberId>()
            .map_err(|e| format!("member_id: {}", e))?;
        let borrow_date = parse_date("borrow_date", &row.borrow_date)?;

        // A garbled return date is not degraded to "open": that would
        // silently put a returned book back on loan.
        let return_date = match row.return_date.trim() {
            "" | "None" => None,
            raw => Some(parse_date("return_date", raw)?),
        };

        Ok(Borrowing {
            id,
            book_id,
            member_id,
            borrow_date,
            return_date,
        })
    }
}

/// Table of borrowings
pub type BorrowingTable = Table<Borrowing>;

impl Table<Borrowing> {
    /// Borrowings not yet returned
    pub fn open(&self) -> impl Iterator<Item = &Borrowing> {
        self.iter().filter(|b| b.is_open())
    }

    /// Open borrowings of one book
    pub fn open_for_book(&self, book_id: BookId) -> Vec<&Borrowing> {
        self.open().filter(|b| b.book_id == book_id).collect()
    }

    /// Open borrowings held by one member
    pub fn open_for_member(&self, member_id: MemberId) -> Vec<&Borrowing> {
        self.open().filter(|b| b.member_id == member_id).collect()
    }

    /// Every borrowing of one book, open or closed
    pub fn for_book(&self, book_id: BookId) -> Vec<&Borrowing> {
        self.iter().filter(|b| b.book_id == book_id).collect()
    }

    /// Every borrowing by one member, open or closed
    pub fn for_member(&self, member_id: MemberId) -> Vec<&Borrowing> {
        self.iter().filter(|b| b.member_id == member_id).collect()
    }

    /// Highest book id referenced by any borrowing
    pub fn max_book_ref(&self) -> Option<BookId> {
        self.iter().map(|b| b.book_id).max()
    }

    /// Highest member id referenced by any borrowing
    pub fn max_member_ref(&self) -> Option<MemberId> {
        self.iter().map(|b| b.member_id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "id,book_id,member_id,borrow_date,return_date\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load(contents: &str) -> Result<BorrowingTable, crate::error::LibraryError> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("borrowings.csv");
        std::fs::write(&path, contents).unwrap();
        let mut table = BorrowingTable::new(path);
        table.load()?;
        Ok(table)
    }

    #[test]
    fn test_empty_and_none_return_dates_are_open() {
        let table = load(&format!(
            "{}1,1,1,2024-01-02,\n2,2,1,2024-01-03,None\n3,3,1,2024-01-04,2024-01-05\n",
            HEADER
        ))
        .unwrap();

        assert!(table.get(BorrowingId::new(1)).unwrap().is_open());
        assert!(table.get(BorrowingId::new(2)).unwrap().is_open());
        assert_eq!(
            table.get(BorrowingId::new(3)).unwrap().return_date,
            Some(date(2024, 1, 5))
        );
        assert_eq!(table.open().count(), 2);
    }

    #[test]
    fn test_row_without_return_date_is_open() {
        let table = load(&format!("{}1,1,1,2024-01-02\n", HEADER)).unwrap();

        let borrowing = table.get(BorrowingId::new(1)).unwrap();
        assert!(borrowing.is_open());
        assert_eq!(borrowing.borrow_date, date(2024, 1, 2));
    }

    #[test]
    fn test_garbled_return_date_fails_load() {
        let result = load(&format!("{}1,1,1,2024-01-02,yesterday\n", HEADER));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_foreign_key_fails_load() {
        let result = load(&format!("{}1,abc,1,2024-01-02,\n", HEADER));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("book_id"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("borrowings.csv");

        let mut table = BorrowingTable::new(path.clone());
        let mut closed = Borrowing::open(
            BorrowingId::new(1),
            BookId::new(1),
            MemberId::new(1),
            date(2024, 2, 1),
        );
        closed.close(date(2024, 2, 10));
        table.insert(closed).unwrap();
        table
            .insert(Borrowing::open(
                BorrowingId::new(2),
                BookId::new(1),
                MemberId::new(2),
                date(2024, 2, 11),
            ))
            .unwrap();
        super::super::file_io::commit_staged(vec![table.stage().unwrap()]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("2,1,2,2024-02-11,\n"));

        let mut reloaded = BorrowingTable::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.all(), table.all());
    }

    #[test]
    fn test_open_filters() {
        let table = load(&format!(
            "{}1,1,1,2024-01-02,2024-01-03\n2,1,2,2024-01-04,\n3,2,2,2024-01-05,\n",
            HEADER
        ))
        .unwrap();

        assert_eq!(table.open_for_book(BookId::new(1)).len(), 1);
        assert_eq!(table.for_book(BookId::new(1)).len(), 2);
        assert_eq!(table.open_for_member(MemberId::new(2)).len(), 2);
        assert_eq!(table.for_member(MemberId::new(1)).len(), 1);
        assert_eq!(table.max_book_ref(), Some(BookId::new(2)));
        assert_eq!(table.max_member_ref(), Some(MemberId::new(2)));
    }
}
