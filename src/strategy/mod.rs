//! Elimination strategies.
//!
//! Both strategies run the same generalized Viterbi elimination:
//!
//! 1. *Backward fold*: for `i` from `n - 2` down to `0`, replace every
//!    `vertex[i][l]` with
//!    `combine(vertex[i][l], aggregate_l'(combine(edge[i][l][l'], vertex[i + 1][l'])))`.
//! 2. *Optimum*: `aggregate_l(vertex[0][l])`.
//! 3. *Traceback*: pick the winning label at node 0, then at each following
//!    node the label that won the fold for the previously chosen label.
//!
//! They differ only in how step 3 finds that winner: [`compact`] recomputes
//! it from the folded tables, [`fast`] looks it up in a backpointer table
//! filled during step 1. Results are bit-identical.

pub(crate) mod compact;
pub(crate) mod fast;

use crate::engine::Solution;
use crate::index::{descending, Index};
use crate::semiring::Semiring;
use crate::tables::{EdgeTable, VertexTable};

/// Aggregate a row that is known to be non-empty.
#[inline]
pub(crate) fn best_of<S, I>(semiring: &S, values: I) -> (S::Value, usize)
where
    S: Semiring,
    I: IntoIterator<Item = S::Value>,
{
    semiring
        .aggregate(values)
        .unwrap_or_else(|| (semiring.zero(), 0))
}

#[inline]
pub(crate) fn node_position<N: Index>(node: N) -> usize {
    node.position()
        .expect("node indices produced by the sweep are non-negative")
}

#[inline]
pub(crate) fn label_at<L: Index>(position: usize) -> L {
    L::from_position(position).expect("label positions are validated at construction")
}

#[inline]
pub(crate) fn label_position<L: Index>(label: L) -> usize {
    label
        .position()
        .expect("backpointers only hold labels produced by the fold")
}

/// Step 1, shared by both strategies.
///
/// `record(node, from, winner)` is called once per folded entry with the
/// label at `node + 1` that won the aggregation.
pub(crate) fn backward_fold<S, N, L, F>(
    semiring: &S,
    vertices: &mut VertexTable<S::Value, N, L>,
    edges: &EdgeTable<S::Value, N, L>,
    mut record: F,
) where
    S: Semiring,
    N: Index,
    L: Index,
    F: FnMut(usize, usize, usize),
{
    let nodes = vertices.num_nodes();
    if nodes < 2 {
        return;
    }
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("backward_fold", nodes, labels = vertices.num_labels()).entered();

    let last = N::from_position(nodes - 1).expect("node positions are validated at construction");
    for node in descending(last) {
        let n = node_position(node);
        let (current, next) = vertices.row_and_successor(n);
        for (from, cost) in current.iter_mut().enumerate() {
            let transitions = edges.transitions_at(n, from);
            let (future, winner) = best_of(
                semiring,
                transitions
                    .iter()
                    .zip(next)
                    .map(|(&edge, &vertex)| semiring.combine(edge, vertex)),
            );
            *cost = semiring.combine(*cost, future);
            record(n, from, winner);
        }
    }
}

/// Steps 2 and 3. `successor(node, label)` names the winning label at
/// `node + 1` given `label` at `node`.
pub(crate) fn traceback<S, N, L, F>(
    semiring: &S,
    vertices: &VertexTable<S::Value, N, L>,
    mut successor: F,
) -> Solution<S::Value, L>
where
    S: Semiring,
    N: Index,
    L: Index,
    F: FnMut(usize, usize) -> usize,
{
    let nodes = vertices.num_nodes();
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("traceback", nodes).entered();

    let (cost, mut label) = best_of(semiring, vertices.row_at(0).iter().copied());
    let mut labelling = Vec::with_capacity(nodes);
    labelling.push(label_at(label));
    for n in 1..nodes {
        label = successor(n - 1, label);
        labelling.push(label_at(label));
    }
    Solution { cost, labelling }
}
