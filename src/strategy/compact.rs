//! Space-optimized elimination: no memory beyond the two tables.
//!
//! Traceback re-runs the aggregation for the chosen label at each node,
//! costing `O(labels)` per node instead of a table lookup.

use super::{backward_fold, best_of, traceback};
use crate::engine::Solution;
use crate::index::Index;
use crate::semiring::Semiring;
use crate::tables::{EdgeTable, VertexTable};

pub(crate) fn solve<S, N, L>(
    semiring: &S,
    vertices: &mut VertexTable<S::Value, N, L>,
    edges: &EdgeTable<S::Value, N, L>,
) -> Solution<S::Value, L>
where
    S: Semiring,
    N: Index,
    L: Index,
{
    backward_fold(semiring, vertices, edges, |_, _, _| {});

    let folded: &VertexTable<S::Value, N, L> = vertices;
    traceback(semiring, folded, |n, from| {
        let next = folded.row_at(n + 1);
        best_of(
            semiring,
            edges
                .transitions_at(n, from)
                .iter()
                .zip(next)
                .map(|(&edge, &vertex)| semiring.combine(edge, vertex)),
        )
        .1
    })
}
