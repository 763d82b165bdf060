use chain_dp::{
    semiring::{MaxPlus, MinPlus, Semiring},
    tables::{EdgeTable, VertexTable},
    Algorithm, ChainProblem,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

type Chain<R> = (Vec<Vec<R>>, Vec<Vec<Vec<R>>>);

fn solve_with<S>(
    semiring: S,
    algorithm: Algorithm,
    (vertices, edges): &Chain<S::Value>,
) -> (S::Value, Vec<u8>, Vec<S::Value>)
where
    S: Semiring,
{
    let mut problem: ChainProblem<S, u32, u8> = ChainProblem::from_tables(
        semiring,
        VertexTable::from_rows(vertices).unwrap(),
        EdgeTable::from_nested(edges).unwrap(),
        algorithm,
    )
    .unwrap();
    let solution = problem.solve().unwrap().clone();
    (
        solution.cost,
        solution.labelling,
        problem.vertices().as_slice().to_vec(),
    )
}

fn random_chain(rng: &mut StdRng, nodes: usize, labels: usize, levels: i32) -> Chain<f64> {
    // few distinct levels, so ties are common
    let mut value = || f64::from(rng.gen_range(-levels..=levels)) * 0.5;
    let vertices = (0..nodes)
        .map(|_| (0..labels).map(|_| value()).collect())
        .collect();
    let edges = (0..nodes - 1)
        .map(|_| {
            (0..labels)
                .map(|_| (0..labels).map(|_| value()).collect())
                .collect()
        })
        .collect();
    (vertices, edges)
}

fn float_chain() -> impl Strategy<Value = Chain<f32>> {
    (1usize..40, 1usize..6).prop_flat_map(|(nodes, labels)| {
        let value = prop_oneof![
            (-4i8..=4).prop_map(f32::from),
            -1.0e3f32..1.0e3,
            Just(f32::INFINITY),
        ];
        (
            prop::collection::vec(prop::collection::vec(value.clone(), labels), nodes),
            prop::collection::vec(
                prop::collection::vec(prop::collection::vec(value, labels), labels),
                nodes - 1,
            ),
        )
    })
}

proptest! {
    #[test]
    fn compact_and_fast_agree_on_min_plus(chain in float_chain()) {
        let compact = solve_with(MinPlus::<f32>::default(), Algorithm::Compact, &chain);
        let fast = solve_with(MinPlus::<f32>::default(), Algorithm::Fast, &chain);
        prop_assert_eq!(compact.0.to_bits(), fast.0.to_bits());
        prop_assert_eq!(compact.1, fast.1);
        let compact_bits: Vec<u32> = compact.2.iter().map(|v| v.to_bits()).collect();
        let fast_bits: Vec<u32> = fast.2.iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(compact_bits, fast_bits);
    }

    #[test]
    fn compact_and_fast_agree_on_max_plus(chain in float_chain()) {
        let compact = solve_with(MaxPlus::<f32>::default(), Algorithm::Compact, &chain);
        let fast = solve_with(MaxPlus::<f32>::default(), Algorithm::Fast, &chain);
        prop_assert_eq!(compact.0.to_bits(), fast.0.to_bits());
        prop_assert_eq!(compact.1, fast.1);
    }
}

#[test]
fn long_chains_with_many_ties_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(nodes, labels) in &[(1usize, 1usize), (2, 7), (200, 3), (1_000, 12), (255, 255)] {
        let chain = random_chain(&mut rng, nodes, labels, 2);
        let compact = solve_with(MinPlus::<f64>::default(), Algorithm::Compact, &chain);
        let fast = solve_with(MinPlus::<f64>::default(), Algorithm::Fast, &chain);
        assert_eq!(compact, fast, "nodes={nodes} labels={labels}");
    }
}

#[test]
fn solving_twice_refolds_the_folded_table() {
    let mut rng = StdRng::seed_from_u64(11);
    let chain = random_chain(&mut rng, 30, 4, 5);
    for algorithm in Algorithm::ALL {
        let mut problem: ChainProblem<MinPlus<f64>, u32, u8> = ChainProblem::from_tables(
            MinPlus::default(),
            VertexTable::from_rows(&chain.0).unwrap(),
            EdgeTable::from_nested(&chain.1).unwrap(),
            algorithm,
        )
        .unwrap();
        let first = problem.solve().unwrap().clone();
        let folded_once = problem.vertices().clone();

        let second = problem.solve_preserving().unwrap();
        assert_eq!(problem.vertices(), &folded_once);

        let third = problem.solve().unwrap().clone();
        assert_eq!(second, third);
        // the last node is never folded, so its row survives both passes
        assert_eq!(
            problem.vertices().row(29),
            VertexTable::<f64, u32, u8>::from_rows(&chain.0).unwrap().row(29)
        );
        assert_eq!(first.labelling.len(), 30);
    }
}
