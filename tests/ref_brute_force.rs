use chain_dp::{
    semiring::{MaxMin, MaxPlus, MaxProduct, MinPlus, OrAnd, Semiring},
    tables::{EdgeTable, VertexTable},
    Algorithm, ChainProblem,
};
use proptest::prelude::*;

/// Value of one labelling, nested the way the elimination nests it:
/// `v0 * (e0 * (v1 * (e1 * v2)))`.
fn labelling_value<S: Semiring>(
    semiring: &S,
    vertices: &[Vec<S::Value>],
    edges: &[Vec<Vec<S::Value>>],
    labelling: &[usize],
) -> S::Value {
    let last = labelling.len() - 1;
    let mut acc = vertices[last][labelling[last]];
    for node in (0..last).rev() {
        let edge = edges[node][labelling[node]][labelling[node + 1]];
        acc = semiring.combine(vertices[node][labelling[node]], semiring.combine(edge, acc));
    }
    acc
}

/// Enumerate labellings in lexicographic order and keep the first optimum.
fn brute_force<S: Semiring>(
    semiring: &S,
    vertices: &[Vec<S::Value>],
    edges: &[Vec<Vec<S::Value>>],
) -> (S::Value, Vec<usize>) {
    let nodes = vertices.len();
    let labels = vertices[0].len();
    let mut current = vec![0usize; nodes];
    let mut best = (labelling_value(semiring, vertices, edges, &current), current.clone());
    loop {
        let mut pos = nodes;
        loop {
            if pos == 0 {
                return best;
            }
            pos -= 1;
            current[pos] += 1;
            if current[pos] < labels {
                break;
            }
            current[pos] = 0;
        }
        let value = labelling_value(semiring, vertices, edges, &current);
        if semiring.prefers(&value, &best.0) {
            best = (value, current.clone());
        }
    }
}

/// The solver's cost must equal the enumerated optimum and its labelling
/// must achieve that cost. With `lexicographic`, the labelling must also be
/// the first optimum in enumeration order; that only holds for semirings
/// without absorbing elements or saturation (min-plus, max-plus), where the
/// greedy traceback cannot pick a tie the enumeration ranks lower.
fn check_against_brute_force<S>(
    semiring: S,
    vertices: Vec<Vec<S::Value>>,
    edges: Vec<Vec<Vec<S::Value>>>,
    lexicographic: bool,
) where
    S: Semiring + Clone,
{
    let (expected_cost, expected_labels) = brute_force(&semiring, &vertices, &edges);
    for algorithm in Algorithm::ALL {
        let mut problem: ChainProblem<S, u16, i64> = ChainProblem::from_tables(
            semiring.clone(),
            VertexTable::from_rows(&vertices).unwrap(),
            EdgeTable::from_nested(&edges).unwrap(),
            algorithm,
        )
        .unwrap();
        let solution = problem.solve().unwrap();
        assert_eq!(solution.cost, expected_cost, "{algorithm}");
        let labels: Vec<usize> = solution.labelling.iter().map(|&l| l as usize).collect();
        assert_eq!(
            labelling_value(&semiring, &vertices, &edges, &labels),
            expected_cost,
            "{algorithm}"
        );
        if lexicographic {
            assert_eq!(labels, expected_labels, "{algorithm}");
        }
    }
}

fn chain_shape() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=4, 1usize..=3)
}

fn chain_of<T: std::fmt::Debug + Clone>(
    values: impl Strategy<Value = T> + Clone,
) -> impl Strategy<Value = (Vec<Vec<T>>, Vec<Vec<Vec<T>>>)> {
    chain_shape().prop_flat_map(move |(nodes, labels)| {
        (
            prop::collection::vec(prop::collection::vec(values.clone(), labels), nodes),
            prop::collection::vec(
                prop::collection::vec(prop::collection::vec(values.clone(), labels), labels),
                nodes - 1,
            ),
        )
    })
}

proptest! {
    #[test]
    fn min_plus_matches_enumeration((vertices, edges) in chain_of(-5i64..=5)) {
        check_against_brute_force(MinPlus::<i64>::default(), vertices, edges, true);
    }

    #[test]
    fn max_plus_matches_enumeration((vertices, edges) in chain_of(-5i32..=5)) {
        check_against_brute_force(MaxPlus::<i32>::default(), vertices, edges, true);
    }

    #[test]
    fn max_min_matches_enumeration((vertices, edges) in chain_of(0u8..=4)) {
        check_against_brute_force(MaxMin::<u8>::default(), vertices, edges, false);
    }

    #[test]
    fn max_product_matches_enumeration((vertices, edges) in chain_of(0i64..=3)) {
        check_against_brute_force(MaxProduct::<i64>::default(), vertices, edges, false);
    }

    #[test]
    fn or_and_matches_enumeration((vertices, edges) in chain_of(any::<bool>())) {
        check_against_brute_force(OrAnd::default(), vertices, edges, false);
    }
}
