use derive_new::new;

/// A half-open interval `[position, position + lines.len())` over one
/// sequence, together with the lines it covers.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Chunk<T> {
    position: usize,
    lines: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lines(&self) -> &[T] {
        &self.lines
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// First index past the covered interval; equals `position` for an
    /// empty chunk.
    pub fn end(&self) -> usize {
        self.position + self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    Insert,
    Delete,
    Change,
}

/// A single edit operation taking a chunk of the source sequence to a chunk
/// of the target sequence.
///
/// `Insert` has an empty source chunk, `Delete` an empty target chunk, and
/// `Change` both non-empty. A delta list produced by the engine is ordered
/// by strictly increasing source position and never overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta<T> {
    Insert { source: Chunk<T>, target: Chunk<T> },
    Delete { source: Chunk<T>, target: Chunk<T> },
    Change { source: Chunk<T>, target: Chunk<T> },
}

impl<T> Delta<T> {
    pub fn kind(&self) -> DeltaKind {
        match self {
            Delta::Insert { .. } => DeltaKind::Insert,
            Delta::Delete { .. } => DeltaKind::Delete,
            Delta::Change { .. } => DeltaKind::Change,
        }
    }

    pub fn source(&self) -> &Chunk<T> {
        match self {
            Delta::Insert { source, .. }
            | Delta::Delete { source, .. }
            | Delta::Change { source, .. } => source,
        }
    }

    pub fn target(&self) -> &Chunk<T> {
        match self {
            Delta::Insert { target, .. }
            | Delta::Delete { target, .. }
            | Delta::Change { target, .. } => target,
        }
    }
}
