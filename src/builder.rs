use crate::engine::{check_edge_shape, check_vertex_shape, Algorithm, ChainProblem};
use crate::error::ChainError;
use crate::index::Index;
use crate::semiring::Semiring;
use crate::tables::{EdgeTable, VertexTable};

pub struct ChainProblemBuilder<S: Semiring, N: Index = usize, L: Index = usize> {
    semiring: S,
    nodes: usize,
    labels: usize,
    algorithm: Option<Algorithm>,
    vertices: Option<VertexTable<S::Value, N, L>>,
    edges: Option<EdgeTable<S::Value, N, L>>,
}

impl<S: Semiring, N: Index, L: Index> ChainProblemBuilder<S, N, L> {
    pub fn new(semiring: S, nodes: usize, labels: usize) -> Self {
        Self {
            semiring,
            nodes,
            labels,
            algorithm: None,
            vertices: None,
            edges: None,
        }
    }
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn with_vertices(mut self, vertices: VertexTable<S::Value, N, L>) -> Self {
        self.vertices = Some(vertices);
        self
    }
    pub fn with_edges(mut self, edges: EdgeTable<S::Value, N, L>) -> Self {
        self.edges = Some(edges);
        self
    }
    pub fn build(self) -> Result<ChainProblem<S, N, L>, ChainError> {
        let algorithm = self.algorithm.unwrap_or_default();
        let mut problem = ChainProblem::new(self.semiring, self.nodes, self.labels, algorithm)?;
        if let Some(vertices) = self.vertices {
            check_vertex_shape(&vertices, self.nodes, self.labels)?;
            problem.replace_vertices(vertices);
        }
        if let Some(edges) = self.edges {
            check_edge_shape(&edges, self.nodes, self.labels)?;
            problem.replace_edges(edges);
        }
        Ok(problem)
    }
}
