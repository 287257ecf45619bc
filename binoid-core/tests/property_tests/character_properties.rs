//! Property-based tests for partial characters
//!
//! This module tests:
//! - Saturations live on the saturation of the original lattice
//! - Saturations reproduce the original values
//! - A character that is identically one has one extension per element of
//!   the saturation modulo the lattice
//! - Equality does not depend on the chosen basis

use binoid_core::PartialCharacter;
use binoid_math::{Cyclo, IntMatrix};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use proptest::prelude::*;

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-3i64..=3, 3), 1..=2).prop_filter(
        "independent rows",
        |rows| IntMatrix::from_rows(rows).is_ok_and(|m| m.rank() == rows.len()),
    )
}

/// gcd of the maximal minors of a matrix with one or two rows and three columns.
///
/// For independent rows this is the index of the lattice in its saturation.
fn maximal_minor_gcd(m: &IntMatrix) -> BigInt {
    let minors: Vec<BigInt> = match m.nrows() {
        1 => m.row(0).to_vec(),
        _ => {
            let (a, b) = (m.row(0), m.row(1));
            [(0, 1), (0, 2), (1, 2)]
                .iter()
                .map(|&(i, j)| &a[i] * &b[j] - &a[j] * &b[i])
                .collect()
        }
    };
    minors.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x)).abs()
}

/// A row divided by the gcd of its entries.
fn primitive(row: &[BigInt]) -> Vec<BigInt> {
    let content = row.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x));
    row.iter().map(|x| x / &content).collect()
}

/// Independent rows in ℤ³ with root-of-unity values.
fn character_strategy() -> impl Strategy<Value = PartialCharacter> {
    (
        prop::collection::vec(prop::collection::vec(-3i64..=3, 3), 1..=2),
        prop::collection::vec((1u32..=4, 0i64..4), 2),
    )
        .prop_filter_map("independent rows", |(rows, roots)| {
            let lattice = IntMatrix::from_rows(&rows).ok()?;
            if lattice.rank() != rows.len() {
                return None;
            }
            let values = roots
                .iter()
                .take(rows.len())
                .map(|&(n, k)| Cyclo::root_of_unity(n, k))
                .collect();
            PartialCharacter::new(lattice, values, vec![0, 1, 2]).ok()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every saturation extends the character to a lattice of the same rank.
    #[test]
    fn saturations_extend(p in character_strategy()) {
        let saturations = p.saturations().unwrap();
        prop_assert!(!saturations.is_empty());
        for s in &saturations {
            prop_assert_eq!(s.rank(), p.rank());
            prop_assert!(maximal_minor_gcd(&s.lattice().without_zero_rows()).is_one());
            for (row, value) in p.lattice().rows().zip(p.values()) {
                prop_assert_eq!(&s.eval(row).unwrap(), value);
                prop_assert!(s.lattice().contains(&primitive(row)).unwrap());
            }
        }
        for (a, s) in saturations.iter().enumerate() {
            for t in &saturations[a + 1..] {
                prop_assert!(!s.equals(t).unwrap());
            }
        }
    }

    /// A character equals its normalized form in both directions.
    #[test]
    fn normalization_preserves_character(p in character_strategy()) {
        let q = p.normalized().unwrap();
        prop_assert!(p.equals(&q).unwrap());
        prop_assert!(q.equals(&p).unwrap());
        let doubled: Vec<BigInt> = p.lattice().row(0).iter().map(|x| x * 2).collect();
        let expected = &p.values()[0] * &p.values()[0];
        prop_assert_eq!(q.eval(&doubled).unwrap(), expected);
    }

    /// The trivial character extends once per element of Sat(L) / L.
    #[test]
    fn trivial_character_extension_count(rows in rows_strategy()) {
        let lattice = IntMatrix::from_rows(&rows).unwrap();
        let index = maximal_minor_gcd(&lattice);
        let ones = vec![Cyclo::one(); rows.len()];
        let p = PartialCharacter::new(lattice, ones, vec![0, 1, 2]).unwrap();
        let result = p.saturations_with_limit(1 << 12).unwrap();
        prop_assert_eq!(BigInt::from(result.characters.len()), index);
    }
}
