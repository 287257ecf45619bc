//! Property-based tests for cyclotomic arithmetic
//!
//! This module tests:
//! - Field axioms across mixed conductors
//! - Inverses and integer powers
//! - Completeness of root extraction

use binoid_math::Cyclo;
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

/// Strategy for a small element: rational times a root of unity plus a rational.
fn cyclo_strategy() -> impl Strategy<Value = Cyclo> {
    (1u32..9, 0i64..8, -5i64..6, 1i64..4, -3i64..4).prop_map(|(n, k, a, b, c)| {
        let q = Cyclo::from_rational(BigRational::new(BigInt::from(a), BigInt::from(b)));
        &(&q * &Cyclo::root_of_unity(n, k)) + &Cyclo::from_integer(c)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Multiplication distributes over addition.
    #[test]
    fn mul_distributes(a in cyclo_strategy(), b in cyclo_strategy(), c in cyclo_strategy()) {
        let lhs = &a * &(&b + &c);
        let rhs = &(&a * &b) + &(&a * &c);
        prop_assert_eq!(lhs, rhs);
    }

    /// Every nonzero element has an inverse.
    #[test]
    fn inverse_roundtrip(a in cyclo_strategy()) {
        prop_assume!(!a.is_zero());
        let inv = a.inv().unwrap();
        prop_assert!((&a * &inv).is_one());
    }

    /// Negative powers invert positive ones.
    #[test]
    fn power_laws(a in cyclo_strategy(), e in 0i64..5) {
        prop_assume!(!a.is_zero());
        let up = a.pow_i64(e).unwrap();
        let down = a.pow_i64(-e).unwrap();
        prop_assert!((&up * &down).is_one());
    }

    /// roots(d) returns d distinct d-th roots of a root of unity times a perfect power.
    #[test]
    fn roots_are_complete(n in 1u32..7, k in 0i64..6, r in 1i64..4, d in 1u32..5) {
        let base = Cyclo::from_integer(r).pow_i64(i64::from(d)).unwrap();
        let value = &base * &Cyclo::root_of_unity(n, k);
        let roots = value.roots(d).unwrap();
        prop_assert_eq!(roots.len(), d as usize);
        for (i, x) in roots.iter().enumerate() {
            prop_assert_eq!(&x.pow_i64(i64::from(d)).unwrap(), &value);
            for y in &roots[i + 1..] {
                prop_assert_ne!(x, y);
            }
        }
    }
}
