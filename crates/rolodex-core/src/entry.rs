//! Contact entries and their nested sub-directory façade.

use std::sync::atomic::{AtomicU64, Ordering};

use log::warn;

use crate::error::DirectoryError;
use crate::sub_list::SubList;

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity handle for an [`Entry`].
///
/// Minted once per constructed entry and preserved by `Clone`, so a clone
/// is a handle to the same directory identity even after its fields are
/// edited. Containment and deletion decisions compare ids, never field
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// A contact record: display name, phone number, email address, and an
/// owned [`SubList`] of nested contacts.
///
/// There is deliberately no `PartialEq`: identity comparison goes through
/// [`same_entry`](Self::same_entry) and name ordering through
/// [`compare_names`](crate::compare_names), and the two must never be
/// collapsed into one notion of equality.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    pub name: String,
    pub phone: String,
    pub email: String,
    subs: SubList,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            subs: SubList::new(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Identity comparison.
    pub fn same_entry(&self, other: &Entry) -> bool {
        self.id == other.id
    }

    pub fn subs(&self) -> &SubList {
        &self.subs
    }

    pub fn subs_mut(&mut self) -> &mut SubList {
        &mut self.subs
    }

    /// Prepends a nested entry to this entry's sub-list.
    pub fn add_sub(&mut self, e: Entry) {
        self.subs.insert_first(e);
    }

    /// Overwrites the fields of the nested entry with the same identity.
    pub fn edit_sub(&mut self, e: &Entry) -> Result<(), DirectoryError> {
        let Some(found) = self.subs.find_same_mut(e) else {
            warn!("sub-entry not found for edit: {}", e.name);
            return Err(DirectoryError::NotFound);
        };
        found.name = e.name.clone();
        found.phone = e.phone.clone();
        found.email = e.email.clone();
        Ok(())
    }

    /// Removes a nested entry from this entry's sub-list.
    pub fn delete_sub(&mut self, e: &Entry) -> Result<(), DirectoryError> {
        self.subs.delete(e)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Entry {
        Entry::new(name, "555-0100", "test@mail.com")
    }

    #[test]
    fn ids_are_unique_per_construction() {
        let a = entry("a");
        let b = entry("a");
        assert_ne!(a.id(), b.id());
        assert!(!a.same_entry(&b));
    }

    #[test]
    fn clone_keeps_identity() {
        let a = entry("a");
        let mut edited = a.clone();
        edited.name = "renamed".into();
        assert!(a.same_entry(&edited));
    }

    #[test]
    fn add_and_delete_sub() {
        let mut owner = entry("owner");
        let sub = entry("sub");
        let handle = sub.clone();
        owner.add_sub(sub);
        assert_eq!(owner.subs().len(), 1);
        owner.delete_sub(&handle).unwrap();
        assert!(owner.subs().is_empty());
    }

    #[test]
    fn edit_sub_overwrites_fields_in_place() {
        let mut owner = entry("owner");
        let sub = Entry::new("Paula", "7998756", "paula@gmail.com");
        let mut edited = sub.clone();
        owner.add_sub(sub);

        edited.name = "Paula Diaz".into();
        edited.phone = "555-0199".into();
        owner.edit_sub(&edited).unwrap();

        let stored = owner.subs().find_by_name("paula diaz").unwrap();
        assert_eq!(stored.phone, "555-0199");
        assert_eq!(stored.email, "paula@gmail.com");
    }

    #[test]
    fn edit_sub_miss_is_reported_not_a_fault() {
        let mut owner = entry("owner");
        owner.add_sub(entry("present"));
        let stranger = entry("stranger");
        assert_eq!(owner.edit_sub(&stranger), Err(DirectoryError::NotFound));
    }
}
