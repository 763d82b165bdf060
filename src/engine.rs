//! Chain dynamic-programming solver.
//!
//! A [`ChainProblem`] owns the vertex and edge tables of one chain, the
//! semiring that scores it, and the elimination strategy chosen at
//! construction. Populate the tables, call [`ChainProblem::solve`], read
//! [`ChainProblem::cost`] and [`ChainProblem::labelling`].
//!
//! ```
//! use chain_dp::{Algorithm, ChainProblem, semiring::MinPlus};
//!
//! let mut problem: ChainProblem<MinPlus<i32>> =
//!     ChainProblem::new(MinPlus::default(), 2, 2, Algorithm::Fast).unwrap();
//! problem.vertices_mut().set_row(0, &[1, 1]);
//! problem.vertices_mut().set_row(1, &[10, 20]);
//! problem.edges_mut()[(0, 1, 0)] = -10;
//! problem.edges_mut()[(0, 1, 1)] = -10;
//! problem.solve().unwrap();
//!
//! assert_eq!(problem.cost(), Some(1));
//! assert_eq!(problem.labelling(), Some(&[1, 0][..]));
//! // node 0 now holds folded costs, the last node is untouched
//! assert_eq!(problem.vertices().row(0), &[11, 1]);
//! assert_eq!(problem.vertices().row(1), &[10, 20]);
//! ```
//!
//! # In-place folding
//!
//! `solve` reuses the vertex table as its working buffer: afterwards every
//! row except the last holds the folded cost of the best suffix starting
//! there. Use [`ChainProblem::solve_preserving`] to keep the caller's values;
//! it folds a private copy and is strictly more expensive.

use crate::error::{ChainError, IndexKind};
use crate::index::{check_count, Index};
use crate::semiring::Semiring;
use crate::strategy::{compact, fast};
use crate::tables::{EdgeTable, VertexTable};
use std::fmt;
use std::str::FromStr;

/// Elimination strategy, fixed when the problem is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// No memory beyond the tables; `O(labels)` traceback per node.
    Compact,
    /// `O(nodes x labels)` backpointers; `O(1)` traceback per node.
    #[default]
    Fast,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Compact, Algorithm::Fast];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Compact => "compact",
            Algorithm::Fast => "fast",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "compact" => Ok(Self::Compact),
            "fast" => Ok(Self::Fast),
            other => Err(format!(
                "the algorithm must be one of 'compact' or 'fast' but '{other}' provided"
            )),
        }
    }
}

/// Optimal value and the labelling achieving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<R, L> {
    pub cost: R,
    /// One label per node.
    pub labelling: Vec<L>,
}

/// One chain instance: tables, semiring, strategy and (after solving) the
/// solution.
#[derive(Clone)]
pub struct ChainProblem<S: Semiring, N: Index = usize, L: Index = usize> {
    semiring: S,
    algorithm: Algorithm,
    nodes: usize,
    labels: usize,
    vertices: VertexTable<S::Value, N, L>,
    edges: EdgeTable<S::Value, N, L>,
    solution: Option<Solution<S::Value, L>>,
}

/// Reject shapes the solver cannot address.
pub(crate) fn check_shape<N: Index, L: Index>(nodes: usize, labels: usize) -> Result<(), ChainError> {
    if nodes == 0 {
        return Err(ChainError::EmptyChain);
    }
    if labels == 0 {
        return Err(ChainError::NoLabels);
    }
    check_count::<N>(IndexKind::Node, nodes)?;
    check_count::<L>(IndexKind::Label, labels)
}

pub(crate) fn check_vertex_shape<R: Copy, N: Index, L: Index>(
    vertices: &VertexTable<R, N, L>,
    nodes: usize,
    labels: usize,
) -> Result<(), ChainError> {
    let expected = (nodes, labels);
    if vertices.shape() != expected {
        return Err(ChainError::VertexShape {
            expected,
            found: vertices.shape(),
        });
    }
    Ok(())
}

/// A chain of `nodes` needs `nodes - 1` edges; with no edges at all the
/// label extent is irrelevant.
pub(crate) fn check_edge_shape<R: Copy, N: Index, L: Index>(
    edges: &EdgeTable<R, N, L>,
    nodes: usize,
    labels: usize,
) -> Result<(), ChainError> {
    let expected = (nodes - 1, labels);
    let (count, width) = edges.shape();
    if count != expected.0 || (count > 0 && width != labels) {
        return Err(ChainError::EdgeShape {
            expected,
            found: edges.shape(),
        });
    }
    Ok(())
}

/// Dispatch to the chosen strategy.
fn eliminate<S, N, L>(
    semiring: &S,
    algorithm: Algorithm,
    vertices: &mut VertexTable<S::Value, N, L>,
    edges: &EdgeTable<S::Value, N, L>,
) -> Solution<S::Value, L>
where
    S: Semiring,
    N: Index,
    L: Index,
{
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!(
        "chain_solve",
        nodes = vertices.num_nodes(),
        labels = vertices.num_labels(),
        algorithm = %algorithm
    )
    .entered();
    match algorithm {
        Algorithm::Compact => compact::solve(semiring, vertices, edges),
        Algorithm::Fast => fast::solve(semiring, vertices, edges),
    }
}

impl<S: Semiring, N: Index, L: Index> ChainProblem<S, N, L> {
    /// A `nodes x labels` chain whose tables are filled with the semiring's
    /// `one` (zero cost under min-plus).
    pub fn new(
        semiring: S,
        nodes: usize,
        labels: usize,
        algorithm: Algorithm,
    ) -> Result<Self, ChainError> {
        check_shape::<N, L>(nodes, labels)?;
        let neutral = semiring.one();
        Ok(Self {
            semiring,
            algorithm,
            nodes,
            labels,
            vertices: VertexTable::filled(nodes, labels, neutral),
            edges: EdgeTable::filled(nodes - 1, labels, neutral),
            solution: None,
        })
    }

    /// Adopt existing tables. The shape is taken from `vertices`; `edges`
    /// must agree with it.
    pub fn from_tables(
        semiring: S,
        vertices: VertexTable<S::Value, N, L>,
        edges: EdgeTable<S::Value, N, L>,
        algorithm: Algorithm,
    ) -> Result<Self, ChainError> {
        let (nodes, labels) = vertices.shape();
        check_shape::<N, L>(nodes, labels)?;
        let problem = Self {
            semiring,
            algorithm,
            nodes,
            labels,
            vertices,
            edges,
            solution: None,
        };
        problem.check_tables()?;
        Ok(problem)
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.labels
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn semiring(&self) -> &S {
        &self.semiring
    }

    pub fn vertices(&self) -> &VertexTable<S::Value, N, L> {
        &self.vertices
    }

    /// Mutable vertex access. Discards any previous solution.
    pub fn vertices_mut(&mut self) -> &mut VertexTable<S::Value, N, L> {
        self.solution = None;
        &mut self.vertices
    }

    pub fn edges(&self) -> &EdgeTable<S::Value, N, L> {
        &self.edges
    }

    /// Mutable edge access. Discards any previous solution.
    pub fn edges_mut(&mut self) -> &mut EdgeTable<S::Value, N, L> {
        self.solution = None;
        &mut self.edges
    }

    /// Swap in a new vertex table, returning the old one. The shape is only
    /// checked by [`solve`](Self::solve).
    pub fn replace_vertices(
        &mut self,
        vertices: VertexTable<S::Value, N, L>,
    ) -> VertexTable<S::Value, N, L> {
        self.solution = None;
        std::mem::replace(&mut self.vertices, vertices)
    }

    /// Swap in a new edge table, returning the old one. The shape is only
    /// checked by [`solve`](Self::solve).
    pub fn replace_edges(&mut self, edges: EdgeTable<S::Value, N, L>) -> EdgeTable<S::Value, N, L> {
        self.solution = None;
        std::mem::replace(&mut self.edges, edges)
    }

    fn check_tables(&self) -> Result<(), ChainError> {
        check_vertex_shape(&self.vertices, self.nodes, self.labels)?;
        check_edge_shape(&self.edges, self.nodes, self.labels)
    }

    /// Run the elimination, folding the vertex table in place.
    ///
    /// Fails only when a replaced table no longer matches the declared
    /// shape. Solving again re-runs the whole algorithm on the current
    /// (already folded) tables.
    pub fn solve(&mut self) -> Result<&Solution<S::Value, L>, ChainError> {
        self.check_tables()?;
        let solution = eliminate(&self.semiring, self.algorithm, &mut self.vertices, &self.edges);
        Ok(self.solution.insert(solution))
    }

    /// Like [`solve`](Self::solve) but leaves the vertex table untouched.
    /// Costs one extra copy of the table.
    pub fn solve_preserving(&self) -> Result<Solution<S::Value, L>, ChainError> {
        self.check_tables()?;
        let mut vertices = self.vertices.clone();
        Ok(eliminate(
            &self.semiring,
            self.algorithm,
            &mut vertices,
            &self.edges,
        ))
    }

    /// Optimal value; `None` until solved.
    pub fn cost(&self) -> Option<S::Value> {
        self.solution.as_ref().map(|s| s.cost)
    }

    /// Optimal labelling; `None` until solved.
    pub fn labelling(&self) -> Option<&[L]> {
        self.solution.as_ref().map(|s| s.labelling.as_slice())
    }

    pub fn solution(&self) -> Option<&Solution<S::Value, L>> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<Solution<S::Value, L>> {
        self.solution
    }
}
