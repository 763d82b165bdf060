//! Semirings: the algebra that parameterizes the chain solver.
//!
//! A semiring pairs an *aggregate* operator (choosing among alternatives, for
//! example `min`) with a *combine* operator (accumulating costs along a path,
//! for example `+`). The elimination in [`crate::engine`] is valid whenever
//! combine distributes over aggregate:
//!
//! ```text
//! combine(a, aggregate(b, c)) == aggregate(combine(a, b), combine(a, c))
//! ```
//!
//! The aggregate must be [`Selective`] so that a reduction can report which
//! element won; traceback depends on it.

use crate::operators::{LogicalAnd, LogicalOr, Max, Min, Operator, Product, Selective, Sum};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Algebraic contract consumed by the chain solver.
pub trait Semiring {
    type Value: Copy + PartialEq + Debug;

    fn combine(&self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// Identity of `combine`: the neutral cost of an absent edge.
    fn one(&self) -> Self::Value;

    /// Identity of `aggregate`: the neutral value of an absent node.
    fn zero(&self) -> Self::Value;

    /// True when `candidate` strictly beats `incumbent` under aggregation.
    fn prefers(&self, candidate: &Self::Value, incumbent: &Self::Value) -> bool;

    /// Aggregate a sequence, returning the optimum and the position of the
    /// first element achieving it. `None` for an empty sequence.
    fn aggregate<I>(&self, values: I) -> Option<(Self::Value, usize)>
    where
        I: IntoIterator<Item = Self::Value>;
}

/// Semiring assembled from one selective aggregate and one combine operator.
pub struct SimpleSemiring<R, A, C> {
    aggregate: A,
    combine: C,
    _value: PhantomData<fn() -> R>,
}

impl<R, A, C> SimpleSemiring<R, A, C> {
    pub fn new(aggregate: A, combine: C) -> Self {
        Self {
            aggregate,
            combine,
            _value: PhantomData,
        }
    }
}

impl<R, A: Default, C: Default> Default for SimpleSemiring<R, A, C> {
    fn default() -> Self {
        Self::new(A::default(), C::default())
    }
}

impl<R, A: Clone, C: Clone> Clone for SimpleSemiring<R, A, C> {
    fn clone(&self) -> Self {
        Self::new(self.aggregate.clone(), self.combine.clone())
    }
}

impl<R, A: Copy, C: Copy> Copy for SimpleSemiring<R, A, C> {}

impl<R, A: Debug, C: Debug> Debug for SimpleSemiring<R, A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleSemiring")
            .field("aggregate", &self.aggregate)
            .field("combine", &self.combine)
            .finish()
    }
}

impl<R, A, C> Semiring for SimpleSemiring<R, A, C>
where
    R: Copy + PartialEq + Debug,
    A: Selective<R>,
    C: Operator<R>,
{
    type Value = R;

    #[inline]
    fn combine(&self, lhs: R, rhs: R) -> R {
        self.combine.apply(lhs, rhs)
    }

    #[inline]
    fn one(&self) -> R {
        self.combine.identity()
    }

    #[inline]
    fn zero(&self) -> R {
        self.aggregate.identity()
    }

    #[inline]
    fn prefers(&self, candidate: &R, incumbent: &R) -> bool {
        self.aggregate.prefers(candidate, incumbent)
    }

    #[inline]
    fn aggregate<I>(&self, values: I) -> Option<(R, usize)>
    where
        I: IntoIterator<Item = R>,
    {
        self.aggregate.select(values)
    }
}

/// Shortest path / Viterbi on negative log-probabilities.
pub type MinPlus<R> = SimpleSemiring<R, Min, Sum>;
/// Longest path / Viterbi on log-probabilities.
pub type MaxPlus<R> = SimpleSemiring<R, Max, Sum>;
/// Bottleneck (widest) path.
pub type MaxMin<R> = SimpleSemiring<R, Max, Min>;
/// Minimax path.
pub type MinMax<R> = SimpleSemiring<R, Min, Max>;
/// Maximum-probability decoding on raw probabilities.
pub type MaxProduct<R> = SimpleSemiring<R, Max, Product>;
/// Boolean reachability.
pub type OrAnd = SimpleSemiring<bool, LogicalOr, LogicalAnd>;

/// Check the distributivity law for one triple of values.
pub fn is_distributive_at<S: Semiring>(
    semiring: &S,
    a: S::Value,
    b: S::Value,
    c: S::Value,
) -> bool {
    let inner = semiring.aggregate([b, c]).map(|(v, _)| v);
    let outer = semiring
        .aggregate([semiring.combine(a, b), semiring.combine(a, c)])
        .map(|(v, _)| v);
    match (inner, outer) {
        (Some(inner), Some(outer)) => semiring.combine(a, inner) == outer,
        _ => false,
    }
}
