//! Display formatting for terminal output
//!
//! Provides utilities for formatting records for terminal display as tables
//! and detail views.

pub mod book;
pub mod loan;
pub mod member;

pub use book::{format_book_details, format_book_list};
pub use loan::{format_history, format_open_loans};
pub use member::{format_member_details, format_member_list};

use std::fmt::Display;

use crate::services::IntegrityIssue;

/// Render an optional value, or "N/A" when absent
pub fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Format the result of an integrity scan
pub fn format_integrity_report(issues: &[IntegrityIssue]) -> String {
    if issues.is_empty() {
        return "No integrity issues found.".to_string();
    }

    let mut output = format!("{} integrity issue(s) found:\n", issues.len());
    for issue in issues {
        let marker = if issue.is_repairable() { "*" } else { "-" };
        output.push_str(&format!("  {} {}\n", marker, issue));
    }

    if issues.iter().any(IntegrityIssue::is_repairable) {
        output.push_str("\nIssues marked * can be fixed with `check --repair`.\n");
    }
    output
}
