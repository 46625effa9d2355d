use crate::engine::error::{DiffError, DiffResult};
use derive_new::new;

/// Advisory observer for the edit-graph search. Notified once before the
/// search, once per edit-distance iteration and once after the corner is
/// reached. Implementations must not influence the computed result.
pub trait ProgressListener {
    fn search_started(&mut self) {}
    fn search_step(&mut self, _d: usize, _max: usize) {}
    fn search_finished(&mut self) {}
}

/// The do-nothing listener.
impl ProgressListener for () {}

pub(crate) type NodeId = usize;

/// A node in the edit graph: `i` elements consumed from the source, `j`
/// from the target, whether the node closes a snake (a run of equal
/// elements) and a back-reference into the arena.
///
/// The bootstrap node sits at `(0, -1)`; it is the only node with a
/// negative coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub(crate) i: isize,
    pub(crate) j: isize,
    pub(crate) snake: bool,
    pub(crate) prev: Option<NodeId>,
}

impl PathNode {
    fn is_bootstrap(&self) -> bool {
        self.i < 0 || self.j < 0
    }
}

/// A solved shortest edit path: the node arena plus the terminal node
/// reached at the target corner. Only the terminal's predecessor chain is
/// meaningful; the rest of the arena is abandoned search state.
#[derive(Debug)]
pub struct EditPath {
    nodes: Vec<PathNode>,
    terminal: NodeId,
}

impl EditPath {
    pub(crate) fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id]
    }

    pub(crate) fn terminal(&self) -> NodeId {
        self.terminal
    }
}

#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<PathNode>,
}

impl Arena {
    fn push(&mut self, node: PathNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn snake(&mut self, i: isize, j: isize, prev: Option<NodeId>) -> NodeId {
        self.push(PathNode {
            i,
            j,
            snake: true,
            prev,
        })
    }

    /// A diff node links to its predecessor's nearest snake ancestor, so the
    /// reconstruction walk alternates diff/snake without revisiting
    /// intermediate diff nodes.
    fn diff(&mut self, i: isize, j: isize, prev: Option<NodeId>) -> NodeId {
        let prev = prev.and_then(|id| self.previous_snake(id));
        self.push(PathNode {
            i,
            j,
            snake: false,
            prev,
        })
    }

    fn previous_snake(&self, mut id: NodeId) -> Option<NodeId> {
        loop {
            let node = &self.nodes[id];
            if node.is_bootstrap() {
                return None;
            }
            match (node.snake, node.prev) {
                (false, Some(prev)) => id = prev,
                _ => return Some(id),
            }
        }
    }

    fn reach(&self, id: NodeId) -> isize {
        self.nodes[id].i
    }
}

/// Myers' greedy shortest-edit-path search over two sequences, under a
/// pluggable element equivalence.
#[derive(new)]
pub struct EditGraphSolver<'d, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    source: &'d [T],
    target: &'d [T],
    equals: F,
}

impl<'d, T, F> EditGraphSolver<'d, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn solve(&self) -> DiffResult<EditPath> {
        self.solve_with_listener(&mut ())
    }

    /// Searches diagonal by diagonal for increasing edit distance `d`,
    /// keeping per diagonal the furthest-reached node. Each step extends
    /// from the better-reaching neighbor diagonal, then slides for free
    /// along any run of equal elements. The first node to reach the corner
    /// `(N, M)` terminates the search; because `d` only grows, that path is
    /// shortest.
    pub fn solve_with_listener(
        &self,
        listener: &mut dyn ProgressListener,
    ) -> DiffResult<EditPath> {
        let n = self.source.len() as isize;
        let m = self.target.len() as isize;
        let max = n + m + 1;
        let size = (1 + 2 * max) as usize;
        let middle = (size / 2) as isize;

        let mut arena = Arena::default();
        let bootstrap = arena.snake(0, -1, None);
        // Slots outside the reachable k-range are never consulted; pointing
        // them at the bootstrap keeps the array index-safe.
        let mut diagonal: Vec<NodeId> = vec![bootstrap; size];

        listener.search_started();
        for d in 0..max {
            listener.search_step(d as usize, max as usize);
            for k in (-d..=d).step_by(2) {
                let kmiddle = (middle + k) as usize;
                let kplus = kmiddle + 1;
                let kminus = kmiddle - 1;

                let from_above = k == -d
                    || (k != d && arena.reach(diagonal[kminus]) < arena.reach(diagonal[kplus]));
                let (mut i, prev) = if from_above {
                    // take the k+1 node without advancing i: an insertion
                    (arena.reach(diagonal[kplus]), diagonal[kplus])
                } else {
                    // take the k-1 node and advance i: a deletion
                    (arena.reach(diagonal[kminus]) + 1, diagonal[kminus])
                };
                let mut j = i - k;

                let node = arena.diff(i, j, Some(prev));
                while i < n
                    && j < m
                    && (self.equals)(&self.source[i as usize], &self.target[j as usize])
                {
                    i += 1;
                    j += 1;
                }
                let node = if i > arena.reach(node) {
                    arena.snake(i, j, Some(node))
                } else {
                    node
                };
                diagonal[kmiddle] = node;

                if i >= n && j >= m {
                    listener.search_finished();
                    return Ok(EditPath {
                        nodes: arena.nodes,
                        terminal: node,
                    });
                }
            }
        }

        Err(DiffError::NoPathFound {
            bound: max as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn char_inputs() -> (Vec<char>, Vec<char>) {
        ("abcabba".chars().collect(), "cbabac".chars().collect())
    }

    fn walk(path: &EditPath) -> Vec<(isize, isize, bool)> {
        let mut nodes = Vec::new();
        let mut current = Some(path.terminal());
        while let Some(id) = current {
            let node = path.node(id);
            nodes.push((node.i, node.j, node.snake));
            current = node.prev;
        }
        nodes.reverse();
        nodes
    }

    #[rstest]
    fn terminal_reaches_the_corner(char_inputs: (Vec<char>, Vec<char>)) {
        let (a, b) = char_inputs;
        let path = EditGraphSolver::new(&a, &b, |x: &char, y: &char| x == y)
            .solve()
            .unwrap();

        let terminal = path.node(path.terminal());
        assert_eq!((terminal.i, terminal.j), (7, 6));
    }

    #[rstest]
    fn path_coordinates_never_decrease(char_inputs: (Vec<char>, Vec<char>)) {
        let (a, b) = char_inputs;
        let path = EditGraphSolver::new(&a, &b, |x: &char, y: &char| x == y)
            .solve()
            .unwrap();

        let nodes = walk(&path);
        for pair in nodes.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "i went backwards: {pair:?}");
            assert!(pair[0].1 <= pair[1].1, "j went backwards: {pair:?}");
        }
    }

    #[rstest]
    fn identical_sequences_solve_as_a_single_snake() {
        let a = vec!["x", "y", "z"];
        let path = EditGraphSolver::new(&a, &a, |x: &&str, y: &&str| x == y)
            .solve()
            .unwrap();

        let terminal = path.node(path.terminal());
        assert!(terminal.snake);
        assert_eq!((terminal.i, terminal.j), (3, 3));
    }

    #[rstest]
    fn empty_inputs_solve_immediately() {
        let a: Vec<&str> = Vec::new();
        let path = EditGraphSolver::new(&a, &a, |x: &&str, y: &&str| x == y).solve();
        assert!(path.is_ok());
    }

    #[rstest]
    fn listener_sees_start_steps_and_end(char_inputs: (Vec<char>, Vec<char>)) {
        #[derive(Default)]
        struct Recorder {
            started: usize,
            steps: Vec<(usize, usize)>,
            finished: usize,
        }
        impl ProgressListener for Recorder {
            fn search_started(&mut self) {
                self.started += 1;
            }
            fn search_step(&mut self, d: usize, max: usize) {
                self.steps.push((d, max));
            }
            fn search_finished(&mut self) {
                self.finished += 1;
            }
        }

        let (a, b) = char_inputs;
        let mut recorder = Recorder::default();
        EditGraphSolver::new(&a, &b, |x: &char, y: &char| x == y)
            .solve_with_listener(&mut recorder)
            .unwrap();

        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.finished, 1);
        // d = 0..=5 for an edit distance of 5, each reporting the same bound
        assert_eq!(recorder.steps.len(), 6);
        assert!(recorder.steps.iter().all(|&(_, max)| max == 14));
        assert_eq!(recorder.steps.last(), Some(&(5, 14)));
    }
}
