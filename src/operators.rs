//! Stateless binary operators used as semiring building blocks.
//!
//! An [`Operator`] is an associative binary function with a neutral element.
//! A [`Selective`] operator always returns one of its two arguments, so a
//! reduction with it can also report *which* element won. The solver relies
//! on that to reconstruct labellings.
//!
//! Ties are broken by first occurrence: when two values are equally good the
//! earlier one (lower label index) is kept.

use num_traits::{One, Zero};
use std::ops::{Add, Mul};

/// Value domains with a least and a greatest element.
///
/// Floats use the infinities so that `Min`/`Max` identities stay absorbing
/// under addition.
pub trait Bounded: Copy + PartialOrd {
    fn least() -> Self;
    fn greatest() -> Self;
}

macro_rules! bounded_int {
    ($($t:ty),*) => {
        $(impl Bounded for $t {
            #[inline]
            fn least() -> Self {
                <$t>::MIN
            }
            #[inline]
            fn greatest() -> Self {
                <$t>::MAX
            }
        })*
    };
}

bounded_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Bounded for f32 {
    #[inline]
    fn least() -> Self {
        f32::NEG_INFINITY
    }
    #[inline]
    fn greatest() -> Self {
        f32::INFINITY
    }
}

impl Bounded for f64 {
    #[inline]
    fn least() -> Self {
        f64::NEG_INFINITY
    }
    #[inline]
    fn greatest() -> Self {
        f64::INFINITY
    }
}

impl Bounded for bool {
    #[inline]
    fn least() -> Self {
        false
    }
    #[inline]
    fn greatest() -> Self {
        true
    }
}

/// Associative binary operator over `R` with a neutral element.
pub trait Operator<R> {
    fn apply(&self, lhs: R, rhs: R) -> R;

    /// Neutral element: `apply(identity(), x) == x`.
    fn identity(&self) -> R;
}

/// An operator whose result is always one of its arguments.
pub trait Selective<R>: Operator<R> {
    /// True when `candidate` strictly beats `incumbent`.
    fn prefers(&self, candidate: &R, incumbent: &R) -> bool;

    /// Reduce `values`, returning the winner and its position.
    ///
    /// Returns `None` for an empty sequence. Among equal values the first one
    /// wins.
    fn select<I>(&self, values: I) -> Option<(R, usize)>
    where
        I: IntoIterator<Item = R>,
    {
        let mut iter = values.into_iter().enumerate();
        let (_, first) = iter.next()?;
        let mut best = first;
        let mut arg = 0;
        for (pos, value) in iter {
            if self.prefers(&value, &best) {
                best = value;
                arg = pos;
            }
        }
        Some((best, arg))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Product;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalAnd;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalOr;

impl<R: Bounded> Operator<R> for Min {
    #[inline]
    fn apply(&self, lhs: R, rhs: R) -> R {
        if rhs < lhs {
            rhs
        } else {
            lhs
        }
    }

    #[inline]
    fn identity(&self) -> R {
        R::greatest()
    }
}

impl<R: Bounded> Selective<R> for Min {
    #[inline]
    fn prefers(&self, candidate: &R, incumbent: &R) -> bool {
        candidate < incumbent
    }
}

impl<R: Bounded> Operator<R> for Max {
    #[inline]
    fn apply(&self, lhs: R, rhs: R) -> R {
        if rhs > lhs {
            rhs
        } else {
            lhs
        }
    }

    #[inline]
    fn identity(&self) -> R {
        R::least()
    }
}

impl<R: Bounded> Selective<R> for Max {
    #[inline]
    fn prefers(&self, candidate: &R, incumbent: &R) -> bool {
        candidate > incumbent
    }
}

impl<R: Copy + Add<Output = R> + Zero> Operator<R> for Sum {
    #[inline]
    fn apply(&self, lhs: R, rhs: R) -> R {
        lhs + rhs
    }

    #[inline]
    fn identity(&self) -> R {
        R::zero()
    }
}

impl<R: Copy + Mul<Output = R> + One> Operator<R> for Product {
    #[inline]
    fn apply(&self, lhs: R, rhs: R) -> R {
        lhs * rhs
    }

    #[inline]
    fn identity(&self) -> R {
        R::one()
    }
}

impl Operator<bool> for LogicalAnd {
    #[inline]
    fn apply(&self, lhs: bool, rhs: bool) -> bool {
        lhs && rhs
    }

    #[inline]
    fn identity(&self) -> bool {
        true
    }
}

impl Selective<bool> for LogicalAnd {
    #[inline]
    fn prefers(&self, candidate: &bool, incumbent: &bool) -> bool {
        !*candidate && *incumbent
    }
}

impl Operator<bool> for LogicalOr {
    #[inline]
    fn apply(&self, lhs: bool, rhs: bool) -> bool {
        lhs || rhs
    }

    #[inline]
    fn identity(&self) -> bool {
        false
    }
}

impl Selective<bool> for LogicalOr {
    #[inline]
    fn prefers(&self, candidate: &bool, incumbent: &bool) -> bool {
        *candidate && !*incumbent
    }
}
