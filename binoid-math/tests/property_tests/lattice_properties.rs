//! Property-based tests for integer lattices
//!
//! This module tests:
//! - The transform identity U·A = H of the Hermite normal form
//! - Lattice membership of integer combinations
//! - Pseudo-inverses of nonsingular matrices

use binoid_math::IntMatrix;
use num_bigint::BigInt;
use num_traits::Zero;
use proptest::prelude::*;

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = IntMatrix> {
    prop::collection::vec(prop::collection::vec(-6i64..7, cols), rows)
        .prop_map(|rows| IntMatrix::from_rows(&rows).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// U·A = H and the HNF spans the same lattice.
    #[test]
    fn hnf_transform_identity(a in matrix_strategy(3, 4)) {
        let (h, u) = a.hnf_with_transform();
        prop_assert_eq!(u.mul(&a).unwrap(), h.clone());
        prop_assert!(a.same_lattice(&h));
        prop_assert_eq!(h.hnf(), h);
    }

    /// Integer combinations of the rows are found by solve_left.
    #[test]
    fn combinations_are_members(a in matrix_strategy(3, 3), coeffs in prop::collection::vec(-4i64..5, 3)) {
        let target: Vec<BigInt> = (0..a.ncols())
            .map(|c| {
                (0..a.nrows())
                    .map(|r| BigInt::from(coeffs[r]) * a.get(r, c))
                    .fold(BigInt::zero(), |acc, x| acc + x)
            })
            .collect();
        let s = a.solve_left(&target).unwrap();
        prop_assert!(s.is_some());
        let s = s.unwrap();
        for c in 0..a.ncols() {
            let value = (0..a.nrows())
                .map(|r| &s[r] * a.get(r, c))
                .fold(BigInt::zero(), |acc, x| acc + x);
            prop_assert_eq!(&value, &target[c]);
        }
    }

    /// B·I = d·Id for nonsingular B.
    #[test]
    fn pseudo_inverse_identity(b in matrix_strategy(3, 3)) {
        prop_assume!(b.rank() == 3);
        let (i, d) = b.pseudo_inverse().unwrap();
        let product = b.mul(&i).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { d.clone() } else { BigInt::zero() };
                prop_assert_eq!(product.get(r, c), &expected);
            }
        }
    }
}
