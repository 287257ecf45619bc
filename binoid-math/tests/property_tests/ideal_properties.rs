//! Property-based tests for ideal operations
//!
//! This module tests:
//! - Intersection is contained in both operands
//! - Quotient and saturation contain the original ideal
//! - The saturation index certifies the saturation

use binoid_math::{Ideal, Monomial, Polynomial, Ring};
use proptest::prelude::*;

/// Strategy for a pure-difference binomial in three variables.
fn binomial_strategy() -> impl Strategy<Value = Polynomial> {
    (
        prop::collection::vec(0u32..3, 3),
        prop::collection::vec(0u32..3, 3),
    )
        .prop_filter("distinct monomials", |(a, b)| a != b)
        .prop_map(|(a, b)| {
            Polynomial::binomial(
                Monomial::from_exponents(&a),
                binoid_math::Cyclo::one(),
                Monomial::from_exponents(&b),
            )
        })
}

fn ideal_strategy() -> impl Strategy<Value = Ideal> {
    prop::collection::vec(binomial_strategy(), 1..3).prop_map(|gens| Ideal::new(Ring::new(3), gens))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// I ∩ J ⊆ I and I ∩ J ⊆ J.
    #[test]
    fn intersection_is_lower_bound(i in ideal_strategy(), j in ideal_strategy()) {
        let meet = i.intersect(&j).unwrap();
        prop_assert!(meet.is_subset(&i).unwrap());
        prop_assert!(meet.is_subset(&j).unwrap());
    }

    /// I ⊆ I : x0 ⊆ I : x0^∞ = I : x0^k.
    #[test]
    fn saturation_chain(i in ideal_strategy()) {
        let x0 = Polynomial::from_var(0);
        let quotient = i.quotient(&x0).unwrap();
        let (sat, k) = i.saturation_with_index(&x0).unwrap();
        prop_assert!(i.is_subset(&quotient).unwrap());
        prop_assert!(quotient.is_subset(&sat).unwrap());
        prop_assert_eq!(i.quotient(&x0.pow(k)).unwrap(), sat);
    }
}
