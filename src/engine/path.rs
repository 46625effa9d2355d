use crate::engine::error::{DiffError, DiffResult};
use crate::engine::patch::{Chunk, Delta};
use crate::engine::solver::EditPath;

/// Walks a solved path backward from the terminal node and emits the edit
/// script it encodes, ordered by increasing source position.
///
/// The chain alternates between diff nodes (one non-matching step) and
/// snake nodes (runs of matches); snakes carry no edits and are skipped.
/// Each diff node is classified against its anchor, the coordinate of the
/// node it extends from: only the target coordinate advanced means an
/// insertion, only the source coordinate a deletion, both a change.
pub fn reconstruct<T: Clone>(
    path: &EditPath,
    source: &[T],
    target: &[T],
) -> DiffResult<Vec<Delta<T>>> {
    let mut deltas = Vec::new();

    let mut current = Some(path.terminal());
    if let Some(id) = current
        && path.node(id).snake
    {
        current = path.node(id).prev;
    }

    while let Some(id) = current {
        let node = path.node(id);
        let Some(prev_id) = node.prev else { break };
        let prev = path.node(prev_id);
        if prev.j < 0 {
            break;
        }
        if node.snake {
            return Err(DiffError::MalformedPath);
        }

        let (i, j) = (node.i as usize, node.j as usize);
        let (ianchor, janchor) = (prev.i as usize, prev.j as usize);

        let source_chunk = Chunk::new(ianchor, source[ianchor..i].to_vec());
        let target_chunk = Chunk::new(janchor, target[janchor..j].to_vec());
        let delta = if ianchor == i && janchor != j {
            Delta::Insert {
                source: source_chunk,
                target: target_chunk,
            }
        } else if ianchor != i && janchor == j {
            Delta::Delete {
                source: source_chunk,
                target: target_chunk,
            }
        } else {
            Delta::Change {
                source: source_chunk,
                target: target_chunk,
            }
        };
        deltas.push(delta);

        current = if prev.snake { prev.prev } else { Some(prev_id) };
    }

    deltas.reverse();
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::patch::DeltaKind;
    use crate::engine::solver::EditGraphSolver;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn line_diff(a: &[&str], b: &[&str]) -> Vec<Delta<String>> {
        let a: Vec<String> = a.iter().map(|s| s.to_string()).collect();
        let b: Vec<String> = b.iter().map(|s| s.to_string()).collect();
        let path = EditGraphSolver::new(&a, &b, |x: &String, y: &String| x == y)
            .solve()
            .unwrap();
        reconstruct(&path, &a, &b).unwrap()
    }

    #[rstest]
    fn identical_sequences_produce_no_deltas() {
        let deltas = line_diff(&["one", "two"], &["one", "two"]);
        assert_eq!(deltas, Vec::new());
    }

    #[rstest]
    fn replaced_line_becomes_a_change_delta() {
        let deltas = line_diff(&["a", "b", "c"], &["a", "x", "c"]);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind(), DeltaKind::Change);
        assert_eq!(deltas[0].source().position(), 1);
        assert_eq!(deltas[0].source().lines(), &["b".to_string()]);
        assert_eq!(deltas[0].target().lines(), &["x".to_string()]);
    }

    #[rstest]
    fn trailing_removal_becomes_a_delete_delta() {
        let deltas = line_diff(&["a", "b"], &["a"]);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind(), DeltaKind::Delete);
        assert_eq!(deltas[0].source().position(), 1);
        assert_eq!(deltas[0].target().size(), 0);
    }

    #[rstest]
    fn trailing_addition_becomes_an_insert_delta() {
        let deltas = line_diff(&["a"], &["a", "b"]);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kind(), DeltaKind::Insert);
        assert_eq!(deltas[0].source().size(), 0);
        assert_eq!(deltas[0].target().position(), 1);
        assert_eq!(deltas[0].target().lines(), &["b".to_string()]);
    }

    #[rstest]
    fn deltas_come_out_in_increasing_source_order() {
        let deltas = line_diff(
            &["line1", "line2", "line3", "line4"],
            &["line2", "line3_modified", "line4", "line5"],
        );

        let positions: Vec<usize> = deltas.iter().map(|d| d.source().position()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(!deltas.is_empty());
    }

    #[rstest]
    fn insert_and_delete_chunks_partition_the_inputs() {
        let a = ["a", "b", "c", "d"];
        let b = ["a", "c", "x", "d"];
        let deltas = line_diff(&a, &b);

        let removed: usize = deltas.iter().map(|d| d.source().size()).sum();
        let added: usize = deltas.iter().map(|d| d.target().size()).sum();
        assert_eq!(a.len() - removed, b.len() - added);
    }
}
