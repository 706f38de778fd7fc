//! Book model
//!
//! A catalogued book and the draft/validation types used to add or edit one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::BookId;

/// Earliest accepted publication year
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

/// How many years past the current one a publication year may lie
pub const FUTURE_YEAR_ALLOWANCE: i32 = 5;

/// Circulation status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// On the shelf
    #[default]
    Available,
    /// Referenced by an open borrowing
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "borrowed" => Ok(Self::Borrowed),
            other => Err(format!("unknown book status '{}'", other)),
        }
    }
}

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// `None` only when a stored value could not be parsed
    pub published_year: Option<i32>,
    pub status: BookStatus,
}

impl Book {
    /// Create a new, available book from validated fields
    pub fn new(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            isbn: fields.isbn,
            published_year: Some(fields.published_year),
            status: BookStatus::Available,
        }
    }

    /// Overwrite the descriptive fields, leaving id and status alone
    pub fn apply(&mut self, fields: BookFields) {
        self.title = fields.title;
        self.author = fields.author;
        self.isbn = fields.isbn;
        self.published_year = Some(fields.published_year);
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Whether this book carries the given isbn (exact match, ignoring padding)
    pub fn has_isbn(&self, isbn: &str) -> bool {
        self.isbn.trim() == isbn.trim()
    }

    /// Label used in selector lists
    pub fn option_label(&self) -> String {
        format!(
            "{} - {} by {} (ISBN: {})",
            self.id, self.title, self.author, self.isbn
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Raw, unvalidated input for adding or editing a book
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Kept as text so a non-numeric year is reported as such
    pub published_year: String,
}

/// Book fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: i32,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        published_year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            published_year: published_year.into(),
        }
    }

    /// Start a draft from an existing book, for partial edits
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            published_year: book
                .published_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate the draft against the field rules.
    ///
    /// `current_year` bounds the publication year from above
    /// (`current_year + FUTURE_YEAR_ALLOWANCE`).
    pub fn validate(&self, current_year: i32) -> Result<BookFields, BookValidationError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let isbn = self.isbn.trim();
        let year = self.published_year.trim();

        if title.is_empty() || author.is_empty() || isbn.is_empty() || year.is_empty() {
            return Err(BookValidationError::MissingFields);
        }

        let published_year: i32 = year
            .parse()
            .map_err(|_| BookValidationError::YearNotNumeric(year.to_string()))?;

        let max = current_year + FUTURE_YEAR_ALLOWANCE;
        if !(MIN_PUBLISHED_YEAR..=max).contains(&published_year) {
            return Err(BookValidationError::YearOutOfRange {
                year: published_year,
                max,
            });
        }

        Ok(BookFields {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            published_year,
        })
    }
}

/// Validation errors for books
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    MissingFields,
    YearNotNumeric(String),
    YearOutOfRange { year: i32, max: i32 },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(
                f,
                "All fields (Title, Author, ISBN, Published Year) are required"
            ),
            Self::YearNotNumeric(raw) => {
                write!(f, "Published year must be a number (got '{}')", raw)
            }
            Self::YearOutOfRange { year, max } => write!(
                f,
                "Published year must be between {} and {} (got {})",
                MIN_PUBLISHED_YEAR, max, year
            ),
        }
    }
}

impl std::error::Error for BookValidationError {}
