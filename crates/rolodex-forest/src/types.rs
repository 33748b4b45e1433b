//! Link-trait definitions.
//!
//! Nodes are plain structs owned by a `Vec`-backed arena; every "pointer"
//! is an `Option<u32>` index into that arena. All tree- and chain-
//! manipulation functions take the arena as a slice and work with indices.

/// Search-tree links (`p`, `l`, `r`).
pub trait TreeLinks {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Doubly-linked-chain links (`prev`, `next`).
pub trait ChainLinks {
    fn prev(&self) -> Option<u32>;
    fn next(&self) -> Option<u32>;
    fn set_prev(&mut self, v: Option<u32>);
    fn set_next(&mut self, v: Option<u32>);
}

/// Three-way comparator used by tree structures: `-1`, `0`, or `+1`.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;
