//! Ranged tree is a height-balanced binary search tree for fast, repeated
//! membership tests against a set built from single values and inclusive
//! ranges, such as the alphabet partition behind a regular-expression
//! character class like `[a-z0-9_]`. Ranges are stored as interval nodes that
//! test both bounds at once, and overlapping or adjacent ranges are merged as
//! they are inserted, so a lookup costs `O(log n)` comparisons in the number
//! of distinct pieces of coverage and never allocates.
//!
//! The tree is append-only: there is no removal, and no ordered iteration.

pub mod element;
pub mod entry;
pub mod error;
mod node;
pub mod ranged_tree;

pub use element::Element;
pub use entry::{Entry, RangedEntry, SingleEntry};
pub use error::Error;
pub use ranged_tree::RangedTree;
