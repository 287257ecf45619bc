//! Property-based tests for cellular decomposition
//!
//! This module tests:
//! - Both strategies return cellular components
//! - The components intersect to the input

use binoid_core::{cellular_decomposition, cellular_decomposition_worklist, is_cellular};
use binoid_math::{Cyclo, Ideal, Monomial, Polynomial, Ring};
use proptest::prelude::*;

/// Pure difference binomials in three variables of degree at most two.
fn binomial_strategy() -> impl Strategy<Value = Polynomial> {
    (
        prop::collection::vec(0u32..2, 3),
        prop::collection::vec(0u32..2, 3),
    )
        .prop_filter("distinct monomials", |(a, b)| a != b)
        .prop_map(|(a, b)| {
            Polynomial::binomial(
                Monomial::from_exponents(&a),
                Cyclo::one(),
                Monomial::from_exponents(&b),
            )
        })
}

fn ideal_strategy() -> impl Strategy<Value = Ideal> {
    prop::collection::vec(binomial_strategy(), 1..3)
        .prop_map(|gens| Ideal::new(Ring::new(3), gens))
        .prop_filter("proper ideal", |i| !i.is_one().unwrap())
}

fn intersect_all(parts: &[Ideal]) -> Ideal {
    parts
        .iter()
        .skip(1)
        .fold(parts[0].clone(), |acc, p| acc.intersect(p).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Recursive splitting covers the ideal with cellular pieces.
    #[test]
    fn recursive_decomposition_is_cellular(i in ideal_strategy()) {
        let parts = cellular_decomposition(&i).unwrap();
        prop_assert!(!parts.is_empty());
        for p in &parts {
            prop_assert!(is_cellular(p).unwrap().is_cellular());
        }
        prop_assert_eq!(intersect_all(&parts), i);
    }

    /// The worklist covers the ideal with cellular pieces.
    #[test]
    fn worklist_decomposition_is_cellular(i in ideal_strategy()) {
        let parts = cellular_decomposition_worklist(&i).unwrap();
        prop_assert!(!parts.is_empty());
        for p in &parts {
            prop_assert!(is_cellular(p).unwrap().is_cellular());
        }
        prop_assert_eq!(intersect_all(&parts), i);
    }
}
