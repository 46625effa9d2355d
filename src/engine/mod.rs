//! Sequence diffing: shortest edit script between two ordered sequences
//!
//! This module implements the diff pipeline in three stages:
//!
//! - `solver`: Myers' greedy edit-graph search for a shortest edit path
//! - `path`: reconstruction of the solved path into typed deltas
//! - `patch`: the chunk/delta data model shared by the stages
//!
//! Elements are compared through a caller-supplied equivalence function, so
//! the same machinery diffs lines, words or single characters.

pub mod error;
pub mod patch;
pub mod path;
pub mod solver;

pub use error::{DiffError, DiffResult};
pub use patch::{Chunk, Delta, DeltaKind};
pub use solver::{EditGraphSolver, EditPath, PathNode, ProgressListener};

/// Computes the minimal edit script taking `source` to `target` under the
/// given element equivalence.
pub fn diff<T, F>(source: &[T], target: &[T], equals: F) -> DiffResult<Vec<Delta<T>>>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let solved = EditGraphSolver::new(source, target, equals).solve()?;
    path::reconstruct(&solved, source, target)
}

/// Same as [`diff`], reporting search progress to `listener`.
pub fn diff_with_listener<T, F>(
    source: &[T],
    target: &[T],
    equals: F,
    listener: &mut dyn ProgressListener,
) -> DiffResult<Vec<Delta<T>>>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let solved = EditGraphSolver::new(source, target, equals).solve_with_listener(listener)?;
    path::reconstruct(&solved, source, target)
}
