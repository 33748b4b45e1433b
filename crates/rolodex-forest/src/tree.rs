//! Search-tree (p / l / r) utility functions.
//!
//! The tree is deliberately unbalanced: nodes are attached where the
//! comparator walk lands them and never rotated afterwards. The comparator
//! is three-way (`-1` / `0` / `+1`) and need not be a total order; a `0`
//! result during [`insert`] means the node is left unattached and the
//! caller decides what to do with it.

use crate::types::TreeLinks;

#[inline]
fn get_p<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}
#[inline]
fn get_l<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}
#[inline]
fn get_r<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}
#[inline]
fn set_p<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}
#[inline]
fn set_l<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}
#[inline]
fn set_r<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

// ── traversal ─────────────────────────────────────────────────────────────

/// Leftmost node of the subtree rooted at `root`.
pub fn first<N: TreeLinks>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`, found through parent links.
pub fn next<N: TreeLinks>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

// ── mutation ──────────────────────────────────────────────────────────────

/// Insert `node` into the tree rooted at `root` by descending with `cmp`.
///
/// A `-1` comparison descends left, `+1` descends right, and the node is
/// attached at the first absent child slot. A `0` comparison stops the walk
/// without attaching anything; the function then returns `false` and the
/// tree is structurally unchanged. The root itself never changes.
pub fn insert<N, K, KF, C>(arena: &mut [N], root: u32, node: u32, key_of: KF, cmp: C) -> bool
where
    N: TreeLinks,
    K: ?Sized,
    KF: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    loop {
        let ord = cmp(key_of(&arena[node as usize]), key_of(&arena[curr as usize]));
        if ord == -1 {
            match get_l(arena, curr) {
                Some(l) => curr = l,
                None => {
                    set_l(arena, curr, Some(node));
                    set_p(arena, node, Some(curr));
                    return true;
                }
            }
        } else if ord == 1 {
            match get_r(arena, curr) {
                Some(r) => curr = r,
                None => {
                    set_r(arena, curr, Some(node));
                    set_p(arena, node, Some(curr));
                    return true;
                }
            }
        } else {
            return false;
        }
    }
}

/// Replacement-candidate walk used by two-child deletion.
///
/// Descends into a child only while that child compares `-1` against the
/// current node, left arm first. Under the ordering invariant this resolves
/// to the leftmost node of the subtree; when the invariant has been bent by
/// an in-place rename the walk stops early instead.
pub fn minor_node<N, K, KF, C>(arena: &[N], start: u32, key_of: &KF, cmp: &C) -> u32
where
    N: TreeLinks,
    K: ?Sized,
    KF: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = start;
    loop {
        if let Some(l) = get_l(arena, curr) {
            if cmp(key_of(&arena[l as usize]), key_of(&arena[curr as usize])) == -1 {
                curr = l;
                continue;
            }
        }
        if let Some(r) = get_r(arena, curr) {
            if cmp(key_of(&arena[r as usize]), key_of(&arena[curr as usize])) == -1 {
                curr = r;
                continue;
            }
        }
        return curr;
    }
}

/// Remove `node` from the tree rooted at `root`.
///
/// Returns the new root. A node with two children is replaced by the
/// [`minor_node`] of its right subtree: the replacement is first removed
/// from its original position, and only then are the target's child links
/// re-read and grafted onto it, so a replacement that was the target's
/// direct child is handled by the re-read.
pub fn remove<N, K, KF, C>(
    arena: &mut [N],
    root: Option<u32>,
    node: u32,
    key_of: &KF,
    cmp: &C,
) -> Option<u32>
where
    N: TreeLinks,
    K: ?Sized,
    KF: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    match (l, r) {
        (None, None) => {
            let p = get_p(arena, node);
            set_p(arena, node, None);
            match p {
                None => None,
                Some(p) => {
                    if get_l(arena, p) == Some(node) {
                        set_l(arena, p, None);
                    } else {
                        set_r(arena, p, None);
                    }
                    root
                }
            }
        }
        (Some(l), Some(r)) => {
            let replacement = minor_node(arena, r, key_of, cmp);
            let mut root = remove(arena, root, replacement, key_of, cmp);

            // The target's children are re-read only after the replacement
            // has been unlinked; its removal may have rewritten them.
            let l = get_l(arena, node);
            let r = get_r(arena, node);
            set_l(arena, replacement, l);
            set_r(arena, replacement, r);
            if let Some(l) = l {
                set_p(arena, l, Some(replacement));
            }
            if let Some(r) = r {
                set_p(arena, r, Some(replacement));
            }

            let p = get_p(arena, node);
            set_p(arena, replacement, p);
            match p {
                None => root = Some(replacement),
                Some(p) => {
                    if get_l(arena, p) == Some(node) {
                        set_l(arena, p, Some(replacement));
                    } else {
                        set_r(arena, p, Some(replacement));
                    }
                }
            }
            set_p(arena, node, None);
            set_l(arena, node, None);
            set_r(arena, node, None);
            root
        }
        _ => {
            let child = l.or(r).unwrap();
            let p = get_p(arena, node);
            set_p(arena, child, p);
            set_p(arena, node, None);
            set_l(arena, node, None);
            set_r(arena, node, None);
            match p {
                None => Some(child),
                Some(p) => {
                    if get_l(arena, p) == Some(node) {
                        set_l(arena, p, Some(child));
                    } else {
                        set_r(arena, p, Some(child));
                    }
                    root
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
