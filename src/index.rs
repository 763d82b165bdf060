//! Node and label index types.
//!
//! Callers pick any primitive integer, signed or unsigned, for node and label
//! indices. Internally the solver works on `usize` positions and converts at
//! the API boundary; the only place where index arithmetic happens in the
//! caller's type is the backward sweep, which goes through [`descending`].

use crate::error::{ChainError, IndexKind};
use num_traits::{NumCast, PrimInt};
use std::fmt::Debug;

/// Capability bound for node and label index types.
pub trait Index: PrimInt + Debug + Send + Sync + 'static {
    /// Convert a `usize` position, `None` if it is not representable.
    #[inline]
    fn from_position(position: usize) -> Option<Self> {
        <Self as NumCast>::from(position)
    }

    /// Convert to a `usize` position, `None` for negative values.
    #[inline]
    fn position(self) -> Option<usize> {
        self.to_usize()
    }

    /// Largest value of the type as a position, saturating at `usize::MAX`.
    #[inline]
    fn max_position() -> usize {
        Self::max_value().to_usize().unwrap_or(usize::MAX)
    }
}

impl<T: PrimInt + Debug + Send + Sync + 'static> Index for T {}

/// Ensure positions `0..count` are all representable in `I`.
pub(crate) fn check_count<I: Index>(kind: IndexKind, count: usize) -> Result<(), ChainError> {
    match count.checked_sub(1) {
        Some(last) if I::from_position(last).is_none() => {
            Err(ChainError::IndexOverflow { kind, count })
        }
        _ => Ok(()),
    }
}

/// Iterate `end - 1, end - 2, ..., 0` without ever stepping below zero.
///
/// The counter is decremented *before* each value is yielded, so it stops on
/// zero instead of wrapping for unsigned types. A non-positive `end` yields
/// nothing.
pub fn descending<I: Index>(end: I) -> Descending<I> {
    Descending { remaining: end }
}

#[derive(Debug, Clone)]
pub struct Descending<I> {
    remaining: I,
}

impl<I: Index> Iterator for Descending<I> {
    type Item = I;

    #[inline]
    fn next(&mut self) -> Option<I> {
        if self.remaining > I::zero() {
            self.remaining = self.remaining - I::one();
            Some(self.remaining)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.position().unwrap_or(0);
        (len, Some(len))
    }
}

impl<I: Index> ExactSizeIterator for Descending<I> {}
