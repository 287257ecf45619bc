//! Property-based tests for classification and redundancy filtering
//!
//! This module tests:
//! - Minimal ideals are idempotent and drawn from the input
//! - Streaming keeps an intersection equal to the full intersection
//! - Binomiality and unitality survive passing to the Gröbner basis

use binoid_core::{is_binomial, is_unital, minimal_ideals, stream_irredundant};
use binoid_math::{Cyclo, Ideal, Monomial, Polynomial, Ring};
use proptest::prelude::*;

fn monomial_strategy() -> impl Strategy<Value = Monomial> {
    prop::collection::vec(0u32..3, 2).prop_map(|e| Monomial::from_exponents(&e))
}

/// Monomials and binomials with coefficient ±1 in two variables.
fn generator_strategy() -> impl Strategy<Value = Polynomial> {
    prop_oneof![
        monomial_strategy().prop_map(Polynomial::from_monomial),
        (monomial_strategy(), monomial_strategy(), prop::bool::ANY)
            .prop_filter("distinct monomials", |(a, b, _)| a != b)
            .prop_map(|(a, b, negate)| {
                let c = if negate { Cyclo::from_integer(-1) } else { Cyclo::one() };
                Polynomial::binomial(a, c, b)
            }),
    ]
}

fn ideal_strategy() -> impl Strategy<Value = Ideal> {
    prop::collection::vec(generator_strategy(), 1..3)
        .prop_map(|gens| Ideal::new(Ring::new(2), gens))
}

fn intersect_all(ring: Ring, parts: &[Ideal]) -> Ideal {
    parts
        .iter()
        .fold(Ideal::unit(ring), |acc, p| acc.intersect(p).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Filtering twice changes nothing, and every survivor came from the input.
    #[test]
    fn minimal_ideals_idempotent(ideals in prop::collection::vec(ideal_strategy(), 1..4)) {
        let once = minimal_ideals(ideals.clone()).unwrap();
        let twice = minimal_ideals(once.clone()).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.len() <= ideals.len());
        for kept in &once {
            prop_assert!(ideals.contains(kept));
        }
    }

    /// Dropped ideals never change the intersection.
    #[test]
    fn streaming_preserves_intersection(ideals in prop::collection::vec(ideal_strategy(), 1..4)) {
        let ring = Ring::new(2);
        let kept = stream_irredundant(ring, ideals.clone()).unwrap();
        prop_assert_eq!(intersect_all(ring, &kept), intersect_all(ring, &ideals));
    }

    /// Classification agrees on generators and on the Gröbner basis.
    #[test]
    fn classification_stable_under_groebner(i in ideal_strategy()) {
        let gb = Ideal::new(i.ring(), i.groebner_basis().unwrap().to_vec());
        prop_assert!(is_binomial(&i).unwrap());
        prop_assert!(is_binomial(&gb).unwrap());
        prop_assert_eq!(is_unital(&i).unwrap(), is_unital(&gb).unwrap());
    }
}
