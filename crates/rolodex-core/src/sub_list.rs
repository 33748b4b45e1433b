//! Doubly linked, unordered list of nested entries.

use std::fmt;

use log::warn;
use rolodex_forest::chain::{push_back, push_front, unlink};
use rolodex_forest::types::ChainLinks;

use crate::entry::Entry;
use crate::error::DirectoryError;
use crate::name_cmp::eq_names_ignore_case;

/// One chain node. Unlinked nodes stay in the arena and are simply no
/// longer reachable from the head.
#[derive(Debug, Clone)]
struct ChainNode {
    entry: Entry,
    prev: Option<u32>,
    next: Option<u32>,
}

impl ChainLinks for ChainNode {
    fn prev(&self) -> Option<u32> {
        self.prev
    }

    fn next(&self) -> Option<u32> {
        self.next
    }

    fn set_prev(&mut self, v: Option<u32>) {
        self.prev = v;
    }

    fn set_next(&mut self, v: Option<u32>) {
        self.next = v;
    }
}

/// Doubly linked list of sub-entries, owned by exactly one [`Entry`].
///
/// There is no ordering invariant; entries sit wherever the caller's
/// insertions put them.
#[derive(Debug, Clone, Default)]
pub struct SubList {
    arena: Vec<ChainNode>,
    head: Option<u32>,
    tail: Option<u32>,
    size: usize,
}

impl SubList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.tail.is_none()
    }

    /// Reported element count.
    ///
    /// Only [`insert_first`](Self::insert_first) increments this counter;
    /// [`insert_last`](Self::insert_last) does not, so after any append the
    /// reported size under-counts the walked node count.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Identity scan over the chain.
    pub fn contains(&self, e: &Entry) -> bool {
        self.find_node(e).is_some()
    }

    fn push_node(&mut self, e: Entry) -> u32 {
        self.arena.push(ChainNode {
            entry: e,
            prev: None,
            next: None,
        });
        (self.arena.len() - 1) as u32
    }

    /// Prepends an entry; the counter is incremented.
    pub fn insert_first(&mut self, e: Entry) {
        let node = self.push_node(e);
        let (head, tail) = push_front(&mut self.arena, self.head, self.tail, node);
        self.head = head;
        self.tail = tail;
        self.size += 1;
    }

    /// Appends an entry. The counter is left alone; appends are invisible
    /// to [`len`](Self::len).
    pub fn insert_last(&mut self, e: Entry) {
        let node = self.push_node(e);
        let (head, tail) = push_back(&mut self.arena, self.head, self.tail, node);
        self.head = head;
        self.tail = tail;
    }

    /// Unlinks the first chain node holding the same entry identity.
    pub fn delete(&mut self, e: &Entry) -> Result<(), DirectoryError> {
        if self.is_empty() {
            warn!("delete on an empty sub-list");
            return Err(DirectoryError::EmptyCollection);
        }
        let Some(node) = self.find_node(e) else {
            warn!("sub-entry not found for delete: {}", e.name);
            return Err(DirectoryError::NotFound);
        };
        let (head, tail) = unlink(&mut self.arena, self.head, self.tail, node);
        self.head = head;
        self.tail = tail;
        self.size = self.size.saturating_sub(1);
        Ok(())
    }

    fn find_node(&self, e: &Entry) -> Option<u32> {
        let mut curr = self.head;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if node.entry.same_entry(e) {
                return Some(i);
            }
            curr = node.next;
        }
        None
    }

    /// First entry whose name matches case-insensitively, walking from the
    /// head.
    pub fn find_by_name(&self, name: &str) -> Option<&Entry> {
        let mut curr = self.head;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if eq_names_ignore_case(&node.entry.name, name) {
                return Some(&node.entry);
            }
            curr = node.next;
        }
        None
    }

    pub(crate) fn find_same_mut(&mut self, e: &Entry) -> Option<&mut Entry> {
        let node = self.find_node(e)?;
        Some(&mut self.arena[node as usize].entry)
    }

    /// Fresh head-to-tail snapshot; nothing is cached across mutations.
    pub fn to_ordered_snapshot(&self) -> Vec<&Entry> {
        let mut out = Vec::new();
        let mut curr = self.head;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            out.push(&node.entry);
            curr = node.next;
        }
        out
    }
}

impl fmt::Display for SubList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }
        let mut curr = self.head;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            write!(f, "<-[{}]->", node.entry.name)?;
            curr = node.next;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Entry {
        Entry::new(name, "555-0100", "test@mail.com")
    }

    fn names(list: &SubList) -> Vec<String> {
        list.to_ordered_snapshot()
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[test]
    fn insert_first_prepends() {
        let mut list = SubList::new();
        list.insert_first(entry("a"));
        list.insert_first(entry("b"));
        list.insert_first(entry("c"));
        assert_eq!(names(&list), vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn insert_last_appends_without_counting() {
        let mut list = SubList::new();
        list.insert_last(entry("a"));
        list.insert_first(entry("b"));
        list.insert_first(entry("c"));
        list.insert_first(entry("d"));
        assert_eq!(names(&list), vec!["d", "c", "b", "a"]);
        // Four reachable nodes, but only the three prepends were counted.
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn delete_on_empty_list_reports_empty() {
        let mut list = SubList::new();
        assert_eq!(
            list.delete(&entry("nobody")),
            Err(DirectoryError::EmptyCollection)
        );
    }

    #[test]
    fn delete_unknown_entry_reports_not_found() {
        let mut list = SubList::new();
        list.insert_first(entry("a"));
        assert_eq!(list.delete(&entry("a")), Err(DirectoryError::NotFound));
    }

    #[test]
    fn delete_matches_by_identity_not_name() {
        let mut list = SubList::new();
        let a = entry("a");
        let a_clone = a.clone();
        list.insert_first(a);
        // The clone carries the same identity, so the delete lands.
        assert_eq!(list.delete(&a_clone), Ok(()));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut list = SubList::new();
        list.insert_first(entry("a"));
        list.insert_first(entry("b"));
        let before = names(&list);
        let size_before = list.len();

        let c = entry("c");
        let handle = c.clone();
        list.insert_first(c);
        list.delete(&handle).unwrap();

        assert_eq!(names(&list), before);
        assert_eq!(list.len(), size_before);
    }

    #[test]
    fn delete_patches_head_middle_and_tail() {
        let mut list = SubList::new();
        let a = entry("a");
        let b = entry("b");
        let c = entry("c");
        let d = entry("d");
        let (ha, hb, hc, hd) = (a.clone(), b.clone(), c.clone(), d.clone());
        list.insert_first(a);
        list.insert_first(b);
        list.insert_first(c);
        list.insert_first(d);
        // d c b a
        list.delete(&hb).unwrap();
        assert_eq!(names(&list), vec!["d", "c", "a"]);
        list.delete(&hd).unwrap();
        assert_eq!(names(&list), vec!["c", "a"]);
        list.delete(&ha).unwrap();
        assert_eq!(names(&list), vec!["c"]);
        list.delete(&hc).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn find_by_name_is_case_insensitive_first_match() {
        let mut list = SubList::new();
        let old = entry("Paula");
        let old_id = old.id();
        list.insert_first(old);
        list.insert_last(entry("Andres"));
        // A later prepend with the same name shadows the earlier node.
        let newer = entry("PAULA");
        let newer_id = newer.id();
        list.insert_first(newer);

        let hit = list.find_by_name("paula").unwrap();
        assert_eq!(hit.id(), newer_id);
        assert_ne!(hit.id(), old_id);
        assert!(list.find_by_name("nobody").is_none());
    }

    #[test]
    fn snapshot_is_fresh_after_mutation() {
        let mut list = SubList::new();
        let a = entry("a");
        let ha = a.clone();
        list.insert_first(a);
        assert_eq!(names(&list), vec!["a"]);
        list.delete(&ha).unwrap();
        assert!(list.to_ordered_snapshot().is_empty());
    }

    #[test]
    fn display_renders_the_chain() {
        let mut list = SubList::new();
        list.insert_first(entry("a"));
        list.insert_first(entry("b"));
        assert_eq!(list.to_string(), "<-[b]-><-[a]->");
        assert_eq!(SubList::new().to_string(), "∅");
    }
}
