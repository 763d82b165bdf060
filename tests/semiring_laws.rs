use chain_dp::semiring::{
    is_distributive_at, MaxMin, MaxPlus, MaxProduct, MinMax, MinPlus, OrAnd, Semiring,
};
use proptest::prelude::*;

fn identities_hold<S: Semiring>(semiring: &S, a: S::Value) -> bool {
    let combined = semiring.combine(semiring.one(), a) == a && semiring.combine(a, semiring.one()) == a;
    let aggregated = semiring.aggregate([semiring.zero(), a]).map(|(v, _)| v) == Some(a)
        && semiring.aggregate([a, semiring.zero()]).map(|(v, _)| v) == Some(a);
    combined && aggregated
}

fn aggregate_is_order_free<S: Semiring>(semiring: &S, b: S::Value, c: S::Value) -> bool {
    let forward = semiring.aggregate([b, c]).map(|(v, _)| v);
    let backward = semiring.aggregate([c, b]).map(|(v, _)| v);
    forward == backward
}

proptest! {
    #[test]
    fn min_plus_laws(a in -1_000i64..1_000, b in -1_000i64..1_000, c in -1_000i64..1_000) {
        let s = MinPlus::<i64>::default();
        prop_assert!(is_distributive_at(&s, a, b, c));
        prop_assert!(identities_hold(&s, a));
        prop_assert!(aggregate_is_order_free(&s, b, c));
    }

    #[test]
    fn max_plus_laws(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6, c in -1.0e6f64..1.0e6) {
        let s = MaxPlus::<f64>::default();
        // rounding is monotone, so the law holds exactly
        prop_assert!(is_distributive_at(&s, a, b, c));
        prop_assert!(identities_hold(&s, a));
    }

    #[test]
    fn bottleneck_laws(a in any::<u16>(), b in any::<u16>(), c in any::<u16>()) {
        let widest = MaxMin::<u16>::default();
        let minimax = MinMax::<u16>::default();
        prop_assert!(is_distributive_at(&widest, a, b, c));
        prop_assert!(is_distributive_at(&minimax, a, b, c));
        prop_assert!(identities_hold(&widest, a));
        prop_assert!(identities_hold(&minimax, a));
    }

    #[test]
    fn max_product_laws_on_non_negative_values(a in 0i64..1_000, b in 0i64..1_000, c in 0i64..1_000) {
        let s = MaxProduct::<i64>::default();
        prop_assert!(is_distributive_at(&s, a, b, c));
        prop_assert!(s.combine(s.one(), a) == a);
        prop_assert!(aggregate_is_order_free(&s, b, c));
    }

    #[test]
    fn or_and_laws(a in any::<bool>(), b in any::<bool>(), c in any::<bool>()) {
        let s = OrAnd::default();
        prop_assert!(is_distributive_at(&s, a, b, c));
        prop_assert!(identities_hold(&s, a));
    }

    #[test]
    fn aggregate_keeps_first_optimum(values in prop::collection::vec(-3i32..=3, 1..20)) {
        let s = MinPlus::<i32>::default();
        let (best, pos) = s.aggregate(values.iter().copied()).unwrap();
        let expected = *values.iter().min().unwrap();
        prop_assert_eq!(best, expected);
        prop_assert_eq!(pos, values.iter().position(|&v| v == expected).unwrap());
    }
}
