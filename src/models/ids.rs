//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. Ids are positive integers assigned by the
//! record store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not a valid record id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id '{0}': expected a positive integer")]
pub struct InvalidId(pub String);

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// The id handed out for the first record of an empty collection
            pub const FIRST: Self = Self(1);

            /// Wrap a raw id value
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Get the underlying integer
            pub const fn get(self) -> u32 {
                self.0
            }

            /// The id following this one
            pub fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                // Accept "#12" as typed in selectors
                let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
                match digits.parse::<u32>() {
                    Ok(value) if value >= 1 => Ok(Self(value)),
                    _ => Err(InvalidId(s.to_string())),
                }
            }
        }
    };
}

define_id!(BookId);
define_id!(MemberId);
define_id!(BorrowingId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!("12".parse::<BookId>().unwrap(), BookId::new(12));
        assert_eq!(" #3 ".parse::<MemberId>().unwrap(), MemberId::new(3));
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!("0".parse::<BookId>().is_err());
        assert!("-4".parse::<BookId>().is_err());
        assert!("abc".parse::<BorrowingId>().is_err());
        assert!("".parse::<BorrowingId>().is_err());
    }

    #[test]
    fn test_next_and_ordering() {
        let id = BookId::FIRST;
        assert_eq!(id.next(), BookId::new(2));
        assert!(BookId::new(2) > BookId::new(1));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&MemberId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: MemberId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MemberId::new(7));
    }
}
