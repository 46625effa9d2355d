//! Aligned diff rows for side-by-side presentation
//!
//! Consumes the edit script produced by [`crate::engine`] and turns it into
//! an ordered list of [`DiffRow`]s: one row per aligned old/new line pair,
//! optionally with inline (word or character level) highlighting spliced in
//! as tag markers.

pub mod generator;
pub mod splitter;

pub use generator::{DiffRowGenerator, DiffRowGeneratorBuilder, TagGenerator};
pub use splitter::Splitter;

use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Equal,
    Insert,
    Delete,
    Change,
}

/// One rendered row of a side-by-side diff. Concatenating the old sides of
/// all rows (skipping inserts) reproduces the original input, and the new
/// sides (skipping deletes) the revised input, up to the configured
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffRow {
    pub kind: RowKind,
    pub old_line: String,
    pub new_line: String,
}
