//! Member display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Borrowing, Member};

use super::or_na;

#[derive(Tabled)]
struct MemberLine {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&Member> for MemberLine {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.get(),
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone().unwrap_or_default(),
        }
    }
}

/// Format a list of members as a table
pub fn format_member_list<'m>(members: impl IntoIterator<Item = &'m Member>) -> String {
    let lines: Vec<MemberLine> = members.into_iter().map(MemberLine::from).collect();
    if lines.is_empty() {
        return "No members found.".to_string();
    }

    Table::new(lines).with(Style::psql()).to_string()
}

/// Format a single member with the books they have borrowed
pub fn format_member_details(member: &Member, borrowings: &[&Borrowing]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Member: {}\n", member.name));
    output.push_str(&format!("  ID:    {}\n", member.id));
    output.push_str(&format!("  Email: {}\n", member.email));
    output.push_str(&format!("  Phone: {}\n", or_na(member.phone.as_deref())));

    let open = borrowings.iter().filter(|b| b.is_open()).count();
    output.push('\n');
    output.push_str(&format!(
        "  Borrowings: {} total, {} open\n",
        borrowings.len(),
        open
    ));
    for borrowing in borrowings {
        output.push_str(&format!(
            "    #{}  book {}  {} -> {}\n",
            borrowing.id,
            borrowing.book_id,
            borrowing.borrow_date,
            or_na(borrowing.return_date)
        ));
    }

    output
}
