//! Scanline stereo matching as a chain problem.
//!
//! Every image row becomes one min-plus chain: pixels are nodes, disparities
//! `0..=D` are labels. The vertex cost of disparity `d` at column `x` is the
//! absolute intensity difference between `left[x]` and `right[x - d]`; the
//! edge cost between neighbouring pixels is `w * |d - d'|`. Rows are solved
//! independently, so there is no vertical consistency.

use crate::engine::{Algorithm, ChainProblem};
use crate::error::{ChainError, StereoError};
use crate::index::Index;
use crate::semiring::MinPlus;
use crate::tables::EdgeTable;
use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Borrowed row-major 8-bit luminance image.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    width: usize,
    height: usize,
    pixels: &'a [u8],
}

impl<'a> ImageView<'a> {
    pub fn new(width: usize, height: usize, pixels: &'a [u8]) -> Result<Self, StereoError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(StereoError::BufferSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

/// Cost of a disparity that points left of the right image's first column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BoundaryPolicy {
    /// Infinite cost: the disparity is never chosen. Disparity 0 is always
    /// in range, so every row keeps a finite optimum.
    #[default]
    Forbid,
    /// A fixed finite cost.
    Penalty(f32),
    /// Compare against the right image's first column instead.
    Replicate,
}

/// Validated inputs of the cost builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoParameters {
    pub max_disparity: usize,
    pub smoothness: f32,
    pub boundary: BoundaryPolicy,
    pub algorithm: Algorithm,
}

impl StereoParameters {
    pub fn new(max_disparity: usize, smoothness: f32) -> Self {
        Self {
            max_disparity,
            smoothness,
            boundary: BoundaryPolicy::default(),
            algorithm: Algorithm::default(),
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check the parameters against the label index type `L`.
    ///
    /// Labels run `0..=max_disparity`, so the label count must itself be a
    /// `usize`.
    pub fn validate<L: Index>(&self) -> Result<(), StereoError> {
        let max = L::max_position().min(usize::MAX - 1);
        if self.max_disparity == 0 || self.max_disparity > max {
            return Err(StereoError::DisparityOutOfRange {
                value: self.max_disparity,
                max,
            });
        }
        if !self.smoothness.is_finite() || self.smoothness < 0.0 {
            return Err(StereoError::InvalidSmoothness(self.smoothness));
        }
        if let BoundaryPolicy::Penalty(penalty) = self.boundary {
            if !penalty.is_finite() || penalty < 0.0 {
                return Err(StereoError::InvalidPenalty(penalty));
            }
        }
        Ok(())
    }
}

/// Disparity labels for a whole image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DisparityMap<L> {
    width: usize,
    height: usize,
    data: Vec<L>,
}

impl<L: Index> DisparityMap<L> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![L::zero(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> L {
        self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[L] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[L] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<L> {
        self.data
    }

    pub fn max_value(&self) -> Option<L> {
        self.data.iter().copied().max()
    }

    /// Raw disparities as 8-bit samples, saturating above 255.
    pub fn to_u8_levels(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|d| d.to_u8().unwrap_or(u8::MAX))
            .collect()
    }

    /// Raw disparities as 16-bit samples, saturating above 65535.
    pub fn to_u16_levels(&self) -> Vec<u16> {
        self.data
            .iter()
            .map(|d| d.to_u16().unwrap_or(u16::MAX))
            .collect()
    }

    /// Disparities stretched so that `max_disparity` maps to 255.
    pub fn to_u8_stretched(&self, max_disparity: usize) -> Vec<u8> {
        let scale = 255.0 / max_disparity.max(1) as f32;
        self.data
            .iter()
            .map(|d| {
                let d = d.to_f32().unwrap_or(0.0);
                (d * scale).round().min(255.0) as u8
            })
            .collect()
    }
}

/// Per-row disparity solver.
#[derive(Debug, Clone)]
pub struct ScanlineStereo<L: Index = u16> {
    params: StereoParameters,
    /// `(D + 1) x (D + 1)` linear smoothness penalties, shared by every edge.
    smoothness: Vec<f32>,
    _label: PhantomData<fn() -> L>,
}

impl<L: Index> ScanlineStereo<L> {
    pub fn new(params: StereoParameters) -> Result<Self, StereoError> {
        params.validate::<L>()?;
        let labels = params.max_disparity + 1;
        let block = labels
            .checked_mul(labels)
            .ok_or(StereoError::DisparityOutOfRange {
                value: params.max_disparity,
                max: L::max_position(),
            })?;
        let mut smoothness = Vec::with_capacity(block);
        for from in 0..labels {
            for to in 0..labels {
                smoothness.push(params.smoothness * from.abs_diff(to) as f32);
            }
        }
        Ok(Self {
            params,
            smoothness,
            _label: PhantomData,
        })
    }

    pub fn parameters(&self) -> &StereoParameters {
        &self.params
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.params.max_disparity + 1
    }

    fn unmatched_cost(&self, left: u8, right_first: u8) -> f32 {
        match self.params.boundary {
            BoundaryPolicy::Forbid => f32::INFINITY,
            BoundaryPolicy::Penalty(penalty) => penalty,
            BoundaryPolicy::Replicate => f32::from(left.abs_diff(right_first)),
        }
    }

    /// Build the chain for one row without solving it.
    pub fn row_problem(
        &self,
        left: &[u8],
        right: &[u8],
    ) -> Result<ChainProblem<MinPlus<f32>, usize, L>, StereoError> {
        if left.len() != right.len() {
            return Err(StereoError::SizeMismatch {
                left: (left.len(), 1),
                right: (right.len(), 1),
            });
        }
        let width = left.len();
        let labels = self.num_labels();
        let mut problem = ChainProblem::new(MinPlus::default(), width, labels, self.params.algorithm)?;

        let right_first = right.first().copied().unwrap_or_default();
        let vertices = problem.vertices_mut().as_mut_slice();
        for (x, (&l, costs)) in left.iter().zip(vertices.chunks_exact_mut(labels)).enumerate() {
            for (d, cost) in costs.iter_mut().enumerate() {
                *cost = match x.checked_sub(d) {
                    Some(rx) => f32::from(l.abs_diff(right[rx])),
                    None => self.unmatched_cost(l, right_first),
                };
            }
        }

        let edges = EdgeTable::repeat_block(width - 1, labels, &self.smoothness)?;
        problem.replace_edges(edges);
        Ok(problem)
    }

    /// Solve one row, writing its disparities into `out`. Returns the row's
    /// optimal cost.
    pub fn solve_row(&self, left: &[u8], right: &[u8], out: &mut [L]) -> Result<f32, StereoError> {
        if out.len() != left.len() {
            return Err(StereoError::SizeMismatch {
                left: (left.len(), 1),
                right: (out.len(), 1),
            });
        }
        let mut problem = self.row_problem(left, right)?;
        let solution = problem.solve()?;
        out.copy_from_slice(&solution.labelling);
        Ok(solution.cost)
    }

    /// Disparity map for a rectified pair of equal-sized images.
    pub fn compute(
        &self,
        left: &ImageView<'_>,
        right: &ImageView<'_>,
    ) -> Result<DisparityMap<L>, StereoError> {
        if left.dimensions() != right.dimensions() {
            return Err(StereoError::SizeMismatch {
                left: left.dimensions(),
                right: right.dimensions(),
            });
        }
        let (width, height) = left.dimensions();
        let mut map = DisparityMap::new(width, height);
        if height == 0 {
            return Ok(map);
        }
        if width == 0 {
            return Err(ChainError::EmptyChain.into());
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "scanline_stereo",
            width,
            height,
            max_disparity = self.params.max_disparity,
            algorithm = %self.params.algorithm
        )
        .entered();

        #[cfg(feature = "parallel")]
        map.data
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, out)| self.solve_indexed_row(y, left, right, out))?;

        #[cfg(not(feature = "parallel"))]
        map.data
            .chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, out)| self.solve_indexed_row(y, left, right, out))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(rows = height, "disparity map complete");

        Ok(map)
    }

    fn solve_indexed_row(
        &self,
        y: usize,
        left: &ImageView<'_>,
        right: &ImageView<'_>,
        out: &mut [L],
    ) -> Result<(), StereoError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("stereo_row", row = y).entered();
        self.solve_row(left.row(y), right.row(y), out).map(|_| ())
    }
}
