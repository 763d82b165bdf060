//! Applications built on the chain solver.
//!
//! - [`stereo`] : per-scanline disparity estimation with a linear
//!   smoothness prior under the min-plus semiring.

pub mod stereo;
