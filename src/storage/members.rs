//! Member table for CSV storage
//!
//! Manages loading and saving members to members.csv

use serde::{Deserialize, Serialize};

use crate::models::{Member, MemberId};

use super::table::{Record, Table};

/// One row of members.csv
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Record for Member {
    type Id = MemberId;
    type Row = MemberRow;

    const ENTITY: &'static str = "Member";
    const HEADERS: &'static [&'static str] = &["id", "name", "email", "phone"];

    fn id(&self) -> MemberId {
        self.id
    }

    fn to_row(&self) -> MemberRow {
        MemberRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }

    fn from_row(row: MemberRow) -> Result<Self, String> {
        let id = row.id.parse::<MemberId>().map_err(|e| e.to_string())?;
        let phone = Some(row.phone.trim().to_string()).filter(|p| !p.is_empty());

        Ok(Member {
            id,
            name: row.name,
            email: row.email,
            phone,
        })
    }
}

/// Table of members
pub type MemberTable = Table<Member>;

impl Table<Member> {
    /// Find the member using `email` (case-insensitive), ignoring the member being edited
    pub fn find_by_email(&self, email: &str, excluding: Option<MemberId>) -> Option<&Member> {
        self.iter()
            .find(|m| Some(m.id) != excluding && m.matches_email(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberDraft;
    use tempfile::TempDir;

    fn member(id: u32, email: &str, phone: Option<&str>) -> Member {
        Member::new(
            MemberId::new(id),
            MemberDraft::new("Ann", email, phone.map(str::to_string))
                .validate()
                .unwrap(),
        )
    }

    #[test]
    fn test_save_and_reload_keeps_missing_phone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("members.csv");

        let mut table = MemberTable::new(path.clone());
        table.insert(member(1, "a@b.com", None)).unwrap();
        table.insert(member(2, "c@d.com", Some("555-0100"))).unwrap();
        super::super::file_io::commit_staged(vec![table.stage().unwrap()]).unwrap();

        let mut reloaded = MemberTable::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.all(), table.all());
        assert_eq!(reloaded.get(MemberId::new(1)).unwrap().phone, None);
    }

    #[test]
    fn test_missing_phone_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("members.csv");
        std::fs::write(&path, "id,name,email\n3,Ann,a@b.com\n").unwrap();

        let mut table = MemberTable::new(path);
        table.load().unwrap();
        assert_eq!(table.get(MemberId::new(3)).unwrap().phone, None);
    }

    #[test]
    fn test_row_without_phone_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("members.csv");
        std::fs::write(&path, "id,name,email,phone\n3,Ann,a@b.com\n4,Bob,b@c.com,555-0100\n")
            .unwrap();

        let mut table = MemberTable::new(path);
        assert_eq!(table.load().unwrap(), 2);
        assert_eq!(table.get(MemberId::new(3)).unwrap().phone, None);
        assert_eq!(
            table.get(MemberId::new(4)).unwrap().phone.as_deref(),
            Some("555-0100")
        );
    }

    #[test]
    fn test_find_by_email_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let mut table = MemberTable::new(temp_dir.path().join("members.csv"));
        table.insert(member(1, "Ann@Example.com", None)).unwrap();

        assert!(table.find_by_email("ann@example.com", None).is_some());
        assert!(table
            .find_by_email("ANN@EXAMPLE.COM", Some(MemberId::new(1)))
            .is_none());
    }
}
