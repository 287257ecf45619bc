//! Hull & Witness Engine.
//!
//! For a cellular binomial ideal `I` with cell variables Δ, the non-cell
//! variables are nilpotent, so only finitely many monomials in them survive
//! modulo `I`. A surviving monomial `m` is a witness when the character of
//! `I : m` lives on a strictly larger lattice than the character of `I`.
//! The hull drops the embedded components those witnesses expose.

use crate::bridge::partial_character_from_ideal;
use crate::cellular::{cell_variables, complement};
use crate::error::Result;
use binoid_math::{Ideal, Monomial, MonomialOrder, Polynomial};
use tracing::trace;

/// Monomials in the non-cell variables that are standard modulo `I`.
///
/// Returns `[1]` when every variable is a cell variable.
pub fn cellular_standard_monomials(ideal: &Ideal) -> Result<Vec<Monomial>> {
    let cells = cell_variables(ideal)?;
    let noncells = complement(ideal.ring().nvars(), &cells);
    if noncells.is_empty() {
        return Ok(vec![Monomial::unit()]);
    }

    let restricted = ideal.eliminate(&cells)?;
    let mut products = vec![Monomial::unit()];
    for &x in &noncells {
        let mut chain = Vec::new();
        let mut power = 0;
        while !restricted.contains(&Polynomial::from_var_power(x, power))? {
            chain.push(power);
            power += 1;
        }
        products = products
            .iter()
            .flat_map(|m| {
                chain
                    .iter()
                    .map(move |&e| m.mul(&Monomial::from_var_power(x, e)))
            })
            .collect();
    }

    let leading = restricted.leading_ideal(&MonomialOrder::GRevLex)?;
    let mut standard = Vec::with_capacity(products.len());
    for m in products {
        if !leading.contains(&Polynomial::from_monomial(m.clone()))? {
            standard.push(m);
        }
    }
    Ok(standard)
}

/// Standard monomials `m` whose quotient `I : m` has a character of larger rank.
pub fn witness_monomials(ideal: &Ideal) -> Result<Vec<Monomial>> {
    let base_rank = partial_character_from_ideal(ideal)?.rank();
    let mut witnesses = Vec::new();
    for m in cellular_standard_monomials(ideal)? {
        let quotient = ideal.quotient(&Polynomial::from_monomial(m.clone()))?;
        let rank = partial_character_from_ideal(&quotient)?.rank();
        if rank > base_rank {
            trace!(monomial = %m, rank, base_rank, "witness monomial");
            witnesses.push(m);
        }
    }
    Ok(witnesses)
}

/// The hull of a cellular binomial ideal.
pub fn cellular_hull(ideal: &Ideal) -> Result<Ideal> {
    let witnesses = witness_monomials(ideal)?;
    if witnesses.is_empty() {
        return Ok(ideal.clone());
    }
    let extended = ideal.with_generators(witnesses.into_iter().map(Polynomial::from_monomial));
    Ok(Ideal::new(ideal.ring(), extended.groebner_basis()?.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use binoid_math::Ring;

    fn ideal(n: usize, gens: &[&str]) -> Ideal {
        Ideal::parse(Ring::new(n), gens).unwrap()
    }

    fn mono(exponents: &[u32]) -> Monomial {
        Monomial::from_exponents(exponents)
    }

    #[test]
    fn test_standard_monomials_all_cells() {
        let i = ideal(2, &["x0 - x1"]);
        assert_eq!(cellular_standard_monomials(&i).unwrap(), vec![Monomial::unit()]);
    }

    #[test]
    fn test_standard_monomials_of_nilpotent_block() {
        // x1, x2 nilpotent with x1^2 = x2^2 = x1*x2 = 0
        let i = ideal(3, &["x1^2", "x2^2", "x1*x2", "x0*x1 - x1"]);
        let mut standard = cellular_standard_monomials(&i).unwrap();
        standard.sort_by(|a, b| a.grevlex_cmp(b));
        assert_eq!(
            standard,
            vec![mono(&[0, 0, 0]), mono(&[0, 0, 1]), mono(&[0, 1, 0])]
        );
    }

    #[test]
    fn test_witnesses_and_hull() {
        let i = ideal(
            6,
            &["x4*x0^3 - x4*x1^3", "x5*x2 - x5*x3", "x4^2", "x5^2", "x4*x5"],
        );
        let mut witnesses = witness_monomials(&i).unwrap();
        witnesses.sort_by(|a, b| a.grevlex_cmp(b));
        assert_eq!(
            witnesses,
            vec![mono(&[0, 0, 0, 0, 0, 1]), mono(&[0, 0, 0, 0, 1, 0])]
        );
        assert_eq!(cellular_hull(&i).unwrap(), ideal(6, &["x4", "x5"]));
    }

    #[test]
    fn test_hull_without_witnesses() {
        let i = ideal(2, &["x1^2", "x0 - 1"]);
        assert!(witness_monomials(&i).unwrap().is_empty());
        assert_eq!(cellular_hull(&i).unwrap(), i);
    }

    #[test]
    fn test_hull_drops_embedded_point() {
        // (x1) ∩ (x1^2, x0 - 1)
        let i = ideal(2, &["x1^2", "x0*x1 - x1"]);
        assert_eq!(witness_monomials(&i).unwrap(), vec![mono(&[0, 1])]);
        assert_eq!(cellular_hull(&i).unwrap(), ideal(2, &["x1"]));
    }
}
