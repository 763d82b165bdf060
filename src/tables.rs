//! Dense cost tables for chain problems.
//!
//! Both tables are stored row-major in a single `Vec`. They are addressed
//! with typed index tuples, `table[(node, label)]` and
//! `edges[(node, from, to)]`, and panic on out-of-range indices the way slice
//! indexing does.

use crate::error::ChainError;
use crate::index::Index;
use std::marker::PhantomData;

/// Per-node label costs: `(node, label) -> R`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexTable<R, N = usize, L = usize> {
    nodes: usize,
    labels: usize,
    data: Vec<R>,
    _index: PhantomData<fn() -> (N, L)>,
}

impl<R: Copy, N: Index, L: Index> VertexTable<R, N, L> {
    /// A `nodes x labels` table with every entry set to `value`.
    pub fn filled(nodes: usize, labels: usize, value: R) -> Self {
        Self {
            nodes,
            labels,
            data: vec![value; nodes * labels],
            _index: PhantomData,
        }
    }

    /// Build from one row per node. Every row must have the same length.
    pub fn from_rows<Row: AsRef<[R]>>(rows: &[Row]) -> Result<Self, ChainError> {
        let nodes = rows.len();
        let labels = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(nodes * labels);
        for row in rows {
            let row = row.as_ref();
            if row.len() != labels {
                return Err(ChainError::VertexShape {
                    expected: (nodes, labels),
                    found: (nodes, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            nodes,
            labels,
            data,
            _index: PhantomData,
        })
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.labels
    }

    /// `(nodes, labels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nodes, self.labels)
    }

    pub fn row(&self, node: N) -> &[R] {
        let n = self.node_position(node);
        self.row_at(n)
    }

    pub fn row_mut(&mut self, node: N) -> &mut [R] {
        let n = self.node_position(node);
        self.row_at_mut(n)
    }

    /// Overwrite every entry of `node`'s row.
    pub fn set_row(&mut self, node: N, values: &[R]) {
        self.row_mut(node).copy_from_slice(values);
    }

    pub fn as_slice(&self) -> &[R] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [R] {
        &mut self.data
    }

    #[inline]
    pub(crate) fn row_at(&self, n: usize) -> &[R] {
        &self.data[n * self.labels..(n + 1) * self.labels]
    }

    #[inline]
    pub(crate) fn row_at_mut(&mut self, n: usize) -> &mut [R] {
        &mut self.data[n * self.labels..(n + 1) * self.labels]
    }

    /// Row `n` mutably together with row `n + 1` shared.
    #[inline]
    pub(crate) fn row_and_successor(&mut self, n: usize) -> (&mut [R], &[R]) {
        let width = self.labels;
        let (head, tail) = self.data[n * width..(n + 2) * width].split_at_mut(width);
        (head, tail)
    }

    fn node_position(&self, node: N) -> usize {
        match node.position() {
            Some(n) if n < self.nodes => n,
            _ => panic!("node index {node:?} out of range for {} nodes", self.nodes),
        }
    }

    fn offset(&self, node: N, label: L) -> usize {
        let n = self.node_position(node);
        match label.position() {
            Some(l) if l < self.labels => n * self.labels + l,
            _ => panic!("label index {label:?} out of range for {} labels", self.labels),
        }
    }
}

impl<R: Copy, N: Index, L: Index> std::ops::Index<(N, L)> for VertexTable<R, N, L> {
    type Output = R;

    fn index(&self, (node, label): (N, L)) -> &R {
        &self.data[self.offset(node, label)]
    }
}

impl<R: Copy, N: Index, L: Index> std::ops::IndexMut<(N, L)> for VertexTable<R, N, L> {
    fn index_mut(&mut self, (node, label): (N, L)) -> &mut R {
        let at = self.offset(node, label);
        &mut self.data[at]
    }
}

/// Transition costs between neighbours: `(node, label at node, label at node + 1) -> R`.
///
/// A chain of `n` nodes has `n - 1` edges; edge `i` joins node `i` to `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTable<R, N = usize, L = usize> {
    edges: usize,
    labels: usize,
    data: Vec<R>,
    _index: PhantomData<fn() -> (N, L)>,
}

impl<R: Copy, N: Index, L: Index> EdgeTable<R, N, L> {
    pub fn filled(edges: usize, labels: usize, value: R) -> Self {
        Self {
            edges,
            labels,
            data: vec![value; edges * labels * labels],
            _index: PhantomData,
        }
    }

    /// Use the same `labels x labels` transition block (row-major, `from`
    /// major) for every edge.
    pub fn repeat_block(edges: usize, labels: usize, block: &[R]) -> Result<Self, ChainError> {
        if block.len() != labels * labels {
            return Err(ChainError::EdgeShape {
                expected: (edges, labels),
                found: (edges, block.len()),
            });
        }
        let mut data = Vec::with_capacity(edges * block.len());
        for _ in 0..edges {
            data.extend_from_slice(block);
        }
        Ok(Self {
            edges,
            labels,
            data,
            _index: PhantomData,
        })
    }

    /// Build from nested `[edge][from][to]` vectors.
    pub fn from_nested(blocks: &[Vec<Vec<R>>]) -> Result<Self, ChainError> {
        let edges = blocks.len();
        let labels = blocks.first().map_or(0, |b| b.len());
        let mut data = Vec::with_capacity(edges * labels * labels);
        for block in blocks {
            if block.len() != labels {
                return Err(ChainError::EdgeShape {
                    expected: (edges, labels),
                    found: (edges, block.len()),
                });
            }
            for row in block {
                if row.len() != labels {
                    return Err(ChainError::EdgeShape {
                        expected: (edges, labels),
                        found: (edges, row.len()),
                    });
                }
                data.extend_from_slice(row);
            }
        }
        Ok(Self {
            edges,
            labels,
            data,
            _index: PhantomData,
        })
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.labels
    }

    /// `(edges, labels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.edges, self.labels)
    }

    /// Costs from label `from` at `node` to every label at `node + 1`.
    pub fn transitions(&self, node: N, from: L) -> &[R] {
        let (e, l) = (self.edge_position(node), self.label_position(from));
        self.transitions_at(e, l)
    }

    pub fn as_slice(&self) -> &[R] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [R] {
        &mut self.data
    }

    #[inline]
    pub(crate) fn transitions_at(&self, edge: usize, from: usize) -> &[R] {
        let start = (edge * self.labels + from) * self.labels;
        &self.data[start..start + self.labels]
    }

    fn edge_position(&self, node: N) -> usize {
        match node.position() {
            Some(e) if e < self.edges => e,
            _ => panic!("edge index {node:?} out of range for {} edges", self.edges),
        }
    }

    fn label_position(&self, label: L) -> usize {
        match label.position() {
            Some(l) if l < self.labels => l,
            _ => panic!("label index {label:?} out of range for {} labels", self.labels),
        }
    }
}

impl<R: Copy, N: Index, L: Index> std::ops::Index<(N, L, L)> for EdgeTable<R, N, L> {
    type Output = R;

    fn index(&self, (node, from, to): (N, L, L)) -> &R {
        let to = self.label_position(to);
        &self.transitions(node, from)[to]
    }
}

impl<R: Copy, N: Index, L: Index> std::ops::IndexMut<(N, L, L)> for EdgeTable<R, N, L> {
    fn index_mut(&mut self, (node, from, to): (N, L, L)) -> &mut R {
        let (e, f, t) = (
            self.edge_position(node),
            self.label_position(from),
            self.label_position(to),
        );
        let at = (e * self.labels + f) * self.labels + t;
        &mut self.data[at]
    }
}
