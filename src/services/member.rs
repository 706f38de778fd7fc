//! Member service
//!
//! Member registration and maintenance. Emails are unique ignoring case.

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Member, MemberDraft, MemberId};
use crate::storage::Storage;

use super::integrity;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a mut Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Register a new member
    pub fn add(&mut self, draft: &MemberDraft) -> LibraryResult<Member> {
        let fields = draft
            .validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;
        integrity::ensure_email_unique(self.storage, &fields.email, None)?;

        let member = Member::new(self.storage.members.next_id(), fields);
        self.storage.members.insert(member.clone())?;
        self.storage.save_all()?;

        self.storage.record(AuditEntry::create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        ));
        tracing::info!(member_id = %member.id, "added member");

        Ok(member)
    }

    /// Replace name, email and phone of a member
    pub fn update(&mut self, id: MemberId, draft: &MemberDraft) -> LibraryResult<Member> {
        let before = self.get(id)?.clone();
        let fields = draft
            .validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;
        integrity::ensure_email_unique(self.storage, &fields.email, Some(id))?;

        let member = self
            .storage
            .members
            .get_mut(id)
            .ok_or_else(|| LibraryError::member_not_found(id.to_string()))?;
        member.apply(fields);
        let after = member.clone();
        self.storage.save_all()?;

        self.storage.record(AuditEntry::change(
            Operation::Update,
            EntityType::Member,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        ));
        tracing::info!(member_id = %id, "updated member");

        Ok(after)
    }

    /// Delete a member holding no open borrowing
    pub fn delete(&mut self, id: MemberId) -> LibraryResult<Member> {
        self.get(id)?;
        integrity::ensure_member_deletable(self.storage, id)?;

        let member = self
            .storage
            .members
            .remove(id)
            .ok_or_else(|| LibraryError::member_not_found(id.to_string()))?;
        self.storage.save_all()?;

        self.storage.record(AuditEntry::delete(
            EntityType::Member,
            id.to_string(),
            Some(member.name.clone()),
            &member,
        ));
        tracing::info!(member_id = %id, "deleted member");

        Ok(member)
    }

    pub fn get(&self, id: MemberId) -> LibraryResult<&Member> {
        self.storage
            .members
            .get(id)
            .ok_or_else(|| LibraryError::member_not_found(id.to_string()))
    }

    pub fn list(&self) -> &[Member] {
        self.storage.members.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryPaths;
    use crate::models::{BookId, Borrowing, BorrowingId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.set_audit_enabled(false);
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_member() {
        let (_temp, mut storage) = create_test_storage();
        let mut service = MemberService::new(&mut storage);

        let member = service
            .add(&MemberDraft::new(" Ann Lee ", "ann@example.com", Some("".into())))
            .unwrap();
        assert_eq!(member.id, MemberId::new(1));
        assert_eq!(member.name, "Ann Lee");
        assert_eq!(member.phone, None);
    }

    #[test]
    fn test_add_rejects_bad_email() {
        let (_temp, mut storage) = create_test_storage();
        let mut service = MemberService::new(&mut storage);

        for email in ["annexample.com", "a@@b.com", "ann@example"] {
            let err = service
                .add(&MemberDraft::new("Ann", email, None))
                .unwrap_err();
            assert!(err.is_validation(), "{} should be rejected", email);
        }
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_email_unique_ignoring_case() {
        let (_temp, mut storage) = create_test_storage();
        let mut service = MemberService::new(&mut storage);
        service
            .add(&MemberDraft::new("Ann", "ann@example.com", None))
            .unwrap();

        let err = service
            .add(&MemberDraft::new("Other Ann", "ANN@Example.com", None))
            .unwrap_err();
        assert!(matches!(err, LibraryError::Duplicate { .. }));
    }

    #[test]
    fn test_update_member() {
        let (_temp, mut storage) = create_test_storage();
        let mut service = MemberService::new(&mut storage);
        let member = service
            .add(&MemberDraft::new("Ann", "ann@example.com", None))
            .unwrap();

        let mut draft = MemberDraft::from_member(&member);
        draft.email = "ANN@example.com".into();
        draft.phone = Some("555-0100".into());
        let updated = service.update(member.id, &draft).unwrap();

        assert_eq!(updated.email, "ANN@example.com");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_delete_member() {
        let (_temp, mut storage) = create_test_storage();
        let mut service = MemberService::new(&mut storage);
        let member = service
            .add(&MemberDraft::new("Ann", "ann@example.com", None))
            .unwrap();

        service.delete(member.id).unwrap();
        assert!(service.get(member.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_blocked_by_open_borrowing() {
        let (_temp, mut storage) = create_test_storage();
        let member = MemberService::new(&mut storage)
            .add(&MemberDraft::new("Ann", "ann@example.com", None))
            .unwrap();
        storage
            .borrowings
            .insert(Borrowing::open(
                BorrowingId::FIRST,
                BookId::FIRST,
                member.id,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ))
            .unwrap();

        let mut service = MemberService::new(&mut storage);
        assert!(matches!(
            service.delete(member.id),
            Err(LibraryError::Referenced { .. })
        ));
        assert_eq!(service.list().len(), 1);
    }
}
