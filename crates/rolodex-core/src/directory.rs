//! Unbalanced binary search tree of contact entries, keyed by
//! case-insensitive name.
//!
//! Node links are `Option<u32>` indices into a `Vec`-backed arena; the link
//! surgery lives in `rolodex-forest` and this module supplies the walks
//! that decide *which* node to touch. Two different questions drive those
//! walks and they must not be conflated: "is this the same entry?" is
//! answered by identity ([`Entry::same_entry`]), while "which way do I
//! descend?" is answered by the name comparator ([`compare_names`]).

use std::fmt;

use log::{debug, warn};
use rolodex_forest::tree::{first, insert, next, remove};
use rolodex_forest::types::TreeLinks;

use crate::entry::Entry;
use crate::error::DirectoryError;
use crate::name_cmp::{compare_names, eq_names_ignore_case};

/// One tree node. Unlinked nodes stay in the arena and are no longer
/// reachable from the root.
#[derive(Debug, Clone)]
struct DirNode {
    entry: Entry,
    p: Option<u32>,
    l: Option<u32>,
    r: Option<u32>,
}

impl TreeLinks for DirNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

fn entry_name(node: &DirNode) -> &str {
    &node.entry.name
}

fn cmp_entry_names(a: &str, b: &str) -> i32 {
    compare_names(a, b)
}

/// The top-level contact directory.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    arena: Vec<DirNode>,
    root: Option<u32>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn push_node(&mut self, e: Entry) -> u32 {
        self.arena.push(DirNode {
            entry: e,
            p: None,
            l: None,
            r: None,
        });
        (self.arena.len() - 1) as u32
    }

    /// Ordering walk that stops at the node holding the same entry
    /// identity. `-1` descends left; everything else descends right, so an
    /// entry whose stored position disagrees with its current name can run
    /// off the tree and report absent.
    fn find_node(&self, e: &Entry) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if node.entry.same_entry(e) {
                return Some(i);
            }
            curr = if compare_names(&e.name, &node.entry.name) == -1 {
                node.l
            } else {
                node.r
            };
        }
        None
    }

    /// Whether this exact entry (by identity) is reachable through the
    /// ordering walk. A distinct entry that merely shares the name is not
    /// considered contained.
    pub fn contains(&self, e: &Entry) -> bool {
        if self.is_empty() {
            debug!("containment check on an empty directory");
            return false;
        }
        self.find_node(e).is_some()
    }

    /// Inserts an entry at the position the comparator walk lands on.
    ///
    /// An entry already contained (same identity) is rejected with
    /// [`DirectoryError::DuplicateKey`]. A comparator tie with an existing
    /// node, such as inserting `"ALEX"` over `"AL"`, discards the entry
    /// silently: no node is created and `Ok(())` is returned.
    pub fn insert(&mut self, e: Entry) -> Result<(), DirectoryError> {
        let Some(root) = self.root else {
            let node = self.push_node(e);
            self.root = Some(node);
            return Ok(());
        };
        if self.contains(&e) {
            warn!("duplicate insert rejected: {}", e.name);
            return Err(DirectoryError::DuplicateKey);
        }
        let node = self.push_node(e);
        if !insert(&mut self.arena, root, node, entry_name, cmp_entry_names) {
            if let Some(dropped) = self.arena.pop() {
                debug!(
                    "insert tied with an existing name, entry discarded: {}",
                    dropped.entry.name
                );
            }
        }
        Ok(())
    }

    /// Overwrites the fields of the contained entry with the same identity.
    ///
    /// The node keeps its position: a rename is not re-keyed, so it can
    /// leave the tree out of order and make the entry unreachable to
    /// [`lookup`](Self::lookup) until it is deleted and re-inserted.
    pub fn edit(&mut self, e: &Entry) -> Result<(), DirectoryError> {
        let Some(node) = self.find_node(e) else {
            warn!("entry not found for edit: {}", e.name);
            return Err(DirectoryError::NotFound);
        };
        let stored = &mut self.arena[node as usize].entry;
        stored.name = e.name.clone();
        stored.phone = e.phone.clone();
        stored.email = e.email.clone();
        Ok(())
    }

    /// Removes the contained entry with the same identity.
    pub fn delete(&mut self, e: &Entry) -> Result<(), DirectoryError> {
        let found = self.find_node(e);
        if self.is_empty() {
            warn!("delete on an empty directory");
            return Err(DirectoryError::EmptyCollection);
        }
        let Some(node) = found else {
            warn!("entry not found for delete: {}", e.name);
            return Err(DirectoryError::NotFound);
        };
        self.root = remove(
            &mut self.arena,
            self.root,
            node,
            &entry_name,
            &cmp_entry_names,
        );
        Ok(())
    }

    /// Case-insensitive exact-name search along the ordering walk.
    ///
    /// The walk commits to a branch at every node, so it terminates early
    /// on a mismatch instead of scanning the whole tree; an entry parked in
    /// a comparator-anomalous position can be missed.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if eq_names_ignore_case(name, &node.entry.name) {
                return Some(&node.entry);
            }
            curr = if compare_names(name, &node.entry.name) == -1 {
                node.l
            } else {
                node.r
            };
        }
        None
    }

    /// Left-visit-right traversal; a fresh sequence on every call.
    pub fn in_order_entries(&self) -> Vec<&Entry> {
        let mut out = Vec::new();
        let mut curr = first(&self.arena, self.root);
        while let Some(i) = curr {
            out.push(&self.arena[i as usize].entry);
            curr = next(&self.arena, i);
        }
        out
    }

    /// Pre-order probe of every node's sub-list for a name match.
    ///
    /// Returns `(owner, matched sub-entry)`. A node that matches does not
    /// descend into its children, but the traversal never stops globally:
    /// the single result slot is overwritten on every match, so the pair
    /// returned is the **last** match in pre-order, not the first.
    pub fn deep_search(&self, name: &str) -> Option<(&Entry, &Entry)> {
        let mut slot = None;
        if let Some(root) = self.root {
            self.deep_search_walk(name, root, &mut slot);
        }
        slot
    }

    fn deep_search_walk<'a>(
        &'a self,
        name: &str,
        node: u32,
        slot: &mut Option<(&'a Entry, &'a Entry)>,
    ) {
        let owner = &self.arena[node as usize];
        if let Some(matched) = owner.entry.subs().find_by_name(name) {
            *slot = Some((&owner.entry, matched));
        } else {
            if let Some(l) = owner.l {
                self.deep_search_walk(name, l, slot);
            }
            if let Some(r) = owner.r {
                self.deep_search_walk(name, r, slot);
            }
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: u32, tab: &str, side: &str) -> fmt::Result {
        let n = &self.arena[node as usize];
        write!(f, "\n{tab}{side} {}", n.entry.name)?;
        if let Some(l) = n.l {
            self.fmt_node(f, l, &format!("{tab}  "), "←")?;
        }
        if let Some(r) = n.r {
            self.fmt_node(f, r, &format!("{tab}  "), "→")?;
        }
        Ok(())
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => {
                write!(f, "Directory")?;
                self.fmt_node(f, root, "", "└─")
            }
            None => write!(f, "Directory ∅"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
