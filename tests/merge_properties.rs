//! Property tests for sparse vector invariants and the merge engine.
//!
//! Verifies that every producing operation keeps indices strictly increasing
//! and in range, that merge results agree with the dense elementwise result
//! in every mode, that dense and coordinate round-trips are exact, and that
//! fixed-pattern vectors never change their stored positions.

mod common;

use common::{init_test_logging, test_proptest_config};
use proptest::prelude::*;
use spvec::linalg::dot;
use spvec::sparse::{
    BinaryOp, FixedSparseVector, MergeMode, SparseRead, SparseVector, SparseWrite, merge,
    merge_op,
};
use std::collections::BTreeMap;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Small integers keep sums and products exact in f64
fn arb_value() -> impl Strategy<Value = f64> {
    (-4i32..=4).prop_map(f64::from)
}

fn arb_dense(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![3 => Just(0.0), 2 => arb_value()],
        len,
    )
}

/// Vector built from a dense draw, so explicit stored zeros come from `with_zeros`
fn arb_sparse(len: usize) -> impl Strategy<Value = SparseVector<f64>> {
    (
        arb_dense(len),
        prop::collection::vec(any::<bool>(), len),
    )
        .prop_map(move |(dense, with_zeros)| {
            let (nzind, nzval) = dense
                .iter()
                .zip(&with_zeros)
                .enumerate()
                .filter(|(_, (v, keep_zero))| **v != 0.0 || **keep_zero)
                .map(|(i, (v, _))| (i, *v))
                .unzip();
            SparseVector::new_checked(len, nzind, nzval).unwrap()
        })
}

fn arb_pair() -> impl Strategy<Value = (SparseVector<f64>, SparseVector<f64>)> {
    (0usize..40).prop_flat_map(|n| (arb_sparse(n), arb_sparse(n)))
}

fn arb_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::Min),
        Just(BinaryOp::Max),
    ]
}

fn is_valid<S: SparseRead<f64>>(x: &S) -> bool {
    let idx = x.indices();
    idx.len() == x.values().len()
        && idx.windows(2).all(|w| w[0] < w[1])
        && idx.last().is_none_or(|&i| i < x.len())
}

// ============================================================================
// Merge correctness
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(300))]

    /// Built-in operators agree with the dense elementwise result.
    #[test]
    fn merge_op_matches_dense((x, y) in arb_pair(), op in arb_op()) {
        init_test_logging();
        let z = merge_op(&x, &y, op).unwrap();
        prop_assert!(is_valid(&z));

        let expected: Vec<f64> = x
            .to_dense()
            .into_iter()
            .zip(y.to_dense())
            .map(|(a, b)| op.apply(a, b).unwrap())
            .collect();
        prop_assert_eq!(z.to_dense(), expected);
    }

    /// Mode 0 never emits more than min(nnz(x), nnz(y)) entries or a stored zero.
    #[test]
    fn intersection_is_bounded((x, y) in arb_pair()) {
        let z = merge(&x, &y, MergeMode::Intersection, |a: f64, b: f64| a * b).unwrap();
        prop_assert!(z.nnz() <= x.nnz().min(y.nnz()));
        prop_assert!(z.nonzeros().iter().all(|&v| v != 0.0));
        let in_both = z
            .nonzero_indices()
            .iter()
            .all(|i| x.nonzero_indices().contains(i) && y.nonzero_indices().contains(i));
        prop_assert!(in_both, "intersection stored a position missing from an operand");
    }

    /// Mode 2 stores no zeros and matches the dense result for any function.
    #[test]
    fn general_mode_matches_dense((x, y) in arb_pair()) {
        let f = |a: f64, b: f64| (a - b).abs() - 1.0;
        let z = merge(&x, &y, MergeMode::General, f).unwrap();
        prop_assert!(is_valid(&z));
        prop_assert!(z.nonzeros().iter().all(|&v| v != 0.0));

        // f(0, 0) != 0, so positions stored in neither operand differ from
        // the dense map; compare only at the union of stored positions
        for (i, (a, b)) in x.to_dense().into_iter().zip(y.to_dense()).enumerate() {
            let stored = x.nonzero_indices().contains(&i) || y.nonzero_indices().contains(&i);
            if stored {
                prop_assert_eq!(z.get(i).unwrap(), f(a, b));
            } else {
                prop_assert_eq!(z.get(i).unwrap(), 0.0);
            }
        }
    }

    /// Mode 1 visits the union of stored positions.
    #[test]
    fn union_covers_both_patterns((x, y) in arb_pair()) {
        let z = merge(&x, &y, MergeMode::Union, |a: f64, b: f64| a + b).unwrap();
        prop_assert!(is_valid(&z));
        prop_assert!(z.nnz() <= x.nnz() + y.nnz());
        for i in z.nonzero_indices() {
            prop_assert!(x.nonzero_indices().contains(i) || y.nonzero_indices().contains(i));
        }
    }

    /// Dot product equals the dense dot product, self-dot included.
    #[test]
    fn dot_matches_dense((x, y) in arb_pair()) {
        let dense: f64 = x.to_dense().iter().zip(y.to_dense()).map(|(a, b)| a * b).sum();
        prop_assert_eq!(dot(&x, &y).unwrap(), dense);
        let sq: f64 = x.to_dense().iter().map(|a| a * a).sum();
        prop_assert_eq!(dot(&x, &x).unwrap(), sq);
    }
}

// ============================================================================
// Construction round-trips and structural invariants
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(300))]

    /// from_dense followed by to_dense reproduces the input exactly.
    #[test]
    fn dense_round_trip(dense in (0usize..64).prop_flat_map(arb_dense)) {
        let x = SparseVector::from_dense(&dense);
        prop_assert!(is_valid(&x));
        prop_assert!(x.nonzeros().iter().all(|&v| v != 0.0));
        prop_assert_eq!(x.to_dense(), dense);
    }

    /// Coordinate construction agrees with folding the pairs into a map.
    #[test]
    fn coo_matches_map_fold(
        pairs in prop::collection::vec((0i64..32, arb_value()), 0..64)
    ) {
        let (indices, values): (Vec<i64>, Vec<f64>) = pairs.iter().copied().unzip();
        let x = SparseVector::from_coo(&indices, &values, Some(32)).unwrap();
        prop_assert!(is_valid(&x));

        let mut folded: BTreeMap<usize, f64> = BTreeMap::new();
        for &(i, v) in &pairs {
            *folded.entry(i as usize).or_insert(0.0) += v;
        }
        let expected_ind: Vec<usize> = folded.keys().copied().collect();
        let expected_val: Vec<f64> = folded.values().copied().collect();
        prop_assert_eq!(x.nonzero_indices(), expected_ind.as_slice());
        prop_assert_eq!(x.nonzeros(), expected_val.as_slice());
    }

    /// Writes and structural maintenance keep the storage invariants.
    #[test]
    fn writes_preserve_invariants(
        x in (1usize..40).prop_flat_map(arb_sparse),
        writes in prop::collection::vec((any::<prop::sample::Index>(), arb_value()), 0..20),
        tol in 0.0f64..3.0,
    ) {
        let mut x = x;
        let mut dense = x.to_dense();
        for (slot, v) in writes {
            let i = slot.index(x.len());
            x.set(i, v).unwrap();
            dense[i] = v;
            prop_assert!(is_valid(&x));
        }
        prop_assert_eq!(x.to_dense(), dense);

        x.droptol(tol);
        prop_assert!(is_valid(&x));
        prop_assert!(x.nonzeros().iter().all(|v| v.abs() > tol));

        x.dropzeros();
        prop_assert!(x.nonzeros().iter().all(|&v| v != 0.0));
    }

    /// A fixed-pattern vector keeps its stored positions under any updates.
    #[test]
    fn fixed_pattern_is_frozen(
        x in (1usize..40).prop_flat_map(arb_sparse),
        writes in prop::collection::vec((any::<prop::sample::Index>(), arb_value()), 0..20),
        tol in 0.0f64..3.0,
    ) {
        let mut f = FixedSparseVector::from_vector(x);
        let pattern = f.indices().to_vec();

        for (slot, v) in writes {
            let i = slot.index(f.len());
            f.set(i, v).unwrap();
        }
        f.fkeep(|i, _| i % 3 != 0);
        f.droptol(tol);
        f.dropzeros();

        prop_assert_eq!(f.indices(), pattern.as_slice());
        prop_assert!(f.iter().all(|(i, v)| i % 3 != 0 || v == 0.0));
    }
}
