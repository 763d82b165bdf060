//! Semiring-generic dynamic programming on chains.
//!
//! This crate finds the optimal joint labelling of a linear chain of nodes
//! under any semiring whose combine operator distributes over its aggregate
//! operator. The same code path covers shortest-path / Viterbi decoding
//! (min-plus), bottleneck paths (max-min), boolean reachability (or-and) and
//! maximum-probability decoding (max-product).
//!
//! ## Core idea
//! 1. Choose a [`Semiring`](semiring::Semiring), for example
//!    [`MinPlus`](semiring::MinPlus).
//! 2. Build a [`ChainProblem`] with the node and label counts and an
//!    [`Algorithm`].
//! 3. Fill its vertex and edge tables, call [`ChainProblem::solve`].
//!
//! Node and label index types are independent generic parameters and may be
//! any primitive integer, signed or unsigned.
//!
//! ## Quick start
//! ```
//! use chain_dp::{semiring::MinPlus, Algorithm, ChainProblemBuilder};
//!
//! let mut problem = ChainProblemBuilder::<MinPlus<f32>, u32, u8>::new(MinPlus::default(), 3, 2)
//!     .with_algorithm(Algorithm::Compact)
//!     .build()
//!     .unwrap();
//! problem.vertices_mut().set_row(0, &[0.0, 5.0]);
//! problem.vertices_mut().set_row(1, &[4.0, 0.0]);
//! problem.vertices_mut().set_row(2, &[0.0, 5.0]);
//! for edge in 0..2 {
//!     // switching labels costs 3
//!     problem.edges_mut()[(edge, 0, 1)] = 3.0;
//!     problem.edges_mut()[(edge, 1, 0)] = 3.0;
//! }
//! let solution = problem.solve().unwrap();
//! assert_eq!(solution.cost, 4.0);
//! assert_eq!(solution.labelling, vec![0, 0, 0]);
//! ```
//!
//! ## Algorithms
//! [`Algorithm::Compact`] keeps no memory beyond the tables and recomputes
//! winners during traceback; [`Algorithm::Fast`] stores a backpointer per
//! node and label. Both return identical costs and labellings.
//!
//! ## Applications
//! [`problems::stereo`] estimates disparity maps from rectified image pairs,
//! one chain per scanline. With the `parallel` feature rows are solved on
//! the rayon thread pool.

pub mod builder;
pub mod engine;
pub mod error;
pub mod index;
pub mod operators;
pub mod problems;
pub mod semiring;
mod strategy;
pub mod tables;

pub use crate::builder::ChainProblemBuilder;
pub use crate::engine::{Algorithm, ChainProblem, Solution};
pub use crate::error::{ChainError, StereoError};
pub use crate::semiring::Semiring;
