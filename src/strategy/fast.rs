//! Time-optimized elimination.
//!
//! The backward fold records, for every `(node, label)`, which label at the
//! next node won the aggregation. Traceback is then one lookup per node at
//! the price of an `(nodes - 1) x labels` backpointer table, stored in the
//! label index type.

use super::{backward_fold, label_at, label_position, traceback};
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
    let labels = vertices.num_labels();
    let edge_count = vertices.num_nodes().saturating_sub(1);
    let mut backpointers = vec![L::zero(); edge_count * labels];

    backward_fold(semiring, vertices, edges, |n, from, winner| {
        backpointers[n * labels + from] = label_at(winner);
    });

    traceback(semiring, vertices, |n, from| {
        label_position(backpointers[n * labels + from])
    })
}
