//! Associated primes and primary decomposition.
//!
//! Every prime of a cellular binomial ideal `I` comes from a saturation of the
//! character of some `I : m`, with `m` a standard monomial in the non-cell
//! variables, plus the non-cell variables themselves. The primary component
//! for a prime `P` is the hull of `I + P|Δ` saturated by the cell variables.
//! Arbitrary binomial ideals go through a cellular decomposition first.

use crate::cellular::{cell_variables, cellular_decomposition_worklist, complement};
use crate::classify::is_binomial;
use crate::engine::BinomialEngine;
use crate::error::{BinomialError, Result};
use crate::hull::{cellular_hull, cellular_standard_monomials};
use crate::redundancy::stream_irredundant_by;
use binoid_math::{Ideal, Polynomial, Ring, Var};
use tracing::{debug, trace};

/// A primary ideal together with its radical.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryComponent {
    /// The primary ideal.
    pub primary: Ideal,
    /// Its associated prime.
    pub prime: Ideal,
}

/// Keep components whose primary ideal shrinks the running intersection.
pub fn stream_irredundant_components(
    ring: Ring,
    components: impl IntoIterator<Item = PrimaryComponent>,
) -> Result<Vec<PrimaryComponent>> {
    stream_irredundant_by(ring, components, |c| &c.primary)
}

fn push_unique(primes: &mut Vec<Ideal>, prime: Ideal) -> Result<bool> {
    for p in primes.iter() {
        if p.equals(&prime)? {
            return Ok(false);
        }
    }
    primes.push(prime);
    Ok(true)
}

fn check_decomposable(ideal: &Ideal) -> Result<()> {
    if !is_binomial(ideal)? {
        return Err(BinomialError::NotBinomial);
    }
    if ideal.is_one()? {
        return Err(BinomialError::NotProper);
    }
    if ideal.is_zero() {
        return Err(BinomialError::ZeroIdeal);
    }
    Ok(())
}

impl BinomialEngine {
    /// Primes from the saturations of the character of `quotient`, plus the
    /// non-cell variables.
    fn primes_of_quotient(
        &mut self,
        quotient: &Ideal,
        noncells: &[Var],
        primes: &mut Vec<Ideal>,
    ) -> Result<()> {
        let ring = quotient.ring();
        let character = self.partial_character_from_ideal(quotient)?;
        for saturated in self.saturations(&character)? {
            let prime = self
                .ideal_from_character(&saturated, ring)?
                .sum(&Ideal::from_vars(ring, noncells))?;
            if push_unique(primes, prime)? {
                self.stats.associated_primes += 1;
            }
        }
        Ok(())
    }

    /// Associated primes of a cellular binomial ideal.
    pub fn cellular_associated_primes(&mut self, ideal: &Ideal) -> Result<Vec<Ideal>> {
        let cells = cell_variables(ideal)?;
        let noncells = complement(ideal.ring().nvars(), &cells);
        let mut primes = Vec::new();
        for m in cellular_standard_monomials(ideal)? {
            let quotient = ideal.quotient(&Polynomial::from_monomial(m.clone()))?;
            trace!(monomial = %m, "associated primes of quotient");
            self.primes_of_quotient(&quotient, &noncells, &mut primes)?;
        }
        debug!(primes = primes.len(), "cellular associated primes");
        Ok(primes)
    }

    /// Minimal primes of a cellular binomial ideal.
    pub fn cellular_minimal_primes(&mut self, ideal: &Ideal) -> Result<Vec<Ideal>> {
        let cells = cell_variables(ideal)?;
        let noncells = complement(ideal.ring().nvars(), &cells);
        let mut primes = Vec::new();
        self.primes_of_quotient(ideal, &noncells, &mut primes)?;
        Ok(primes)
    }

    /// Primary decomposition of a cellular binomial ideal.
    pub fn cellular_primary_decomposition(
        &mut self,
        ideal: &Ideal,
    ) -> Result<Vec<PrimaryComponent>> {
        let cells = cell_variables(ideal)?;
        let noncells = complement(ideal.ring().nvars(), &cells);
        let mut components = Vec::new();
        for prime in self.cellular_associated_primes(ideal)? {
            let cell_part = if noncells.is_empty() {
                prime.clone()
            } else {
                prime.eliminate(&noncells)?
            };
            let helper = ideal.sum(&cell_part)?.cascade_saturation(&cells)?;
            let primary = cellular_hull(&helper)?;
            components.push(PrimaryComponent { primary, prime });
        }
        self.stats.primary_components += components.len() as u64;
        Ok(components)
    }

    /// Primary decomposition of a proper nonzero binomial ideal.
    ///
    /// Cellular pieces come from the worklist strategy; components that do
    /// not shrink the running intersection are dropped.
    pub fn binomial_primary_decomposition(
        &mut self,
        ideal: &Ideal,
    ) -> Result<Vec<PrimaryComponent>> {
        check_decomposable(ideal)?;
        let pieces = cellular_decomposition_worklist(ideal)?;
        self.stats.cellular_components += pieces.len() as u64;
        let mut all = Vec::new();
        for piece in &pieces {
            all.extend(self.cellular_primary_decomposition(piece)?);
        }
        let kept = stream_irredundant_components(ideal.ring(), all)?;
        debug!(
            pieces = pieces.len(),
            components = kept.len(),
            "binomial primary decomposition"
        );
        Ok(kept)
    }

    /// Associated primes of the cellular pieces of a binomial ideal.
    pub fn binomial_associated_primes(&mut self, ideal: &Ideal) -> Result<Vec<Ideal>> {
        check_decomposable(ideal)?;
        let mut primes = Vec::new();
        for piece in cellular_decomposition_worklist(ideal)? {
            for prime in self.cellular_associated_primes(&piece)? {
                push_unique(&mut primes, prime)?;
            }
        }
        Ok(primes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal(n: usize, gens: &[&str]) -> Ideal {
        Ideal::parse(Ring::new(n), gens).unwrap()
    }

    fn intersect_all(parts: &[PrimaryComponent]) -> Ideal {
        parts
            .iter()
            .skip(1)
            .fold(parts[0].primary.clone(), |acc, c| acc.intersect(&c.primary).unwrap())
    }

    #[test]
    fn test_minimal_primes_of_cube_difference() {
        let mut engine = BinomialEngine::new();
        let i = ideal(2, &["x0^3 - x1^3"]);
        let primes = engine.cellular_minimal_primes(&i).unwrap();
        assert_eq!(primes.len(), 3);
        assert!(primes.contains(&ideal(2, &["x0 - x1"])));
    }

    #[test]
    fn test_associated_primes_with_embedded_point() {
        let mut engine = BinomialEngine::new();
        let i = ideal(2, &["x1^2", "x0*x1 - x1"]);
        let primes = engine.cellular_associated_primes(&i).unwrap();
        assert_eq!(primes.len(), 2);
        assert!(primes.contains(&ideal(2, &["x1"])));
        assert!(primes.contains(&ideal(2, &["x0 - 1", "x1"])));
        assert_eq!(engine.stats().associated_primes, 2);
    }

    #[test]
    fn test_cellular_primary_decomposition() {
        let mut engine = BinomialEngine::new();
        let i = ideal(2, &["x1^2", "x0*x1 - x1"]);
        let components = engine.cellular_primary_decomposition(&i).unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(intersect_all(&components), i);
        for c in &components {
            assert!(c.primary.is_subset(&c.prime).unwrap());
        }
    }

    #[test]
    fn test_binomial_primary_decomposition() {
        let mut engine = BinomialEngine::new();
        let i = ideal(2, &["x0^2*x1 - x0*x1"]);
        let components = engine.binomial_primary_decomposition(&i).unwrap();
        assert_eq!(intersect_all(&components), i);
        let primes: Vec<&Ideal> = components.iter().map(|c| &c.prime).collect();
        assert!(primes.contains(&&ideal(2, &["x0"])));
        assert!(primes.contains(&&ideal(2, &["x1"])));
        assert!(primes.contains(&&ideal(2, &["x0 - 1"])));

        let assoc = engine.binomial_associated_primes(&i).unwrap();
        assert_eq!(assoc.len(), 3);
    }

    #[test]
    fn test_decomposition_preconditions() {
        let mut engine = BinomialEngine::new();
        let ring = Ring::new(2);
        assert!(matches!(
            engine.binomial_primary_decomposition(&Ideal::zero(ring)),
            Err(BinomialError::ZeroIdeal)
        ));
        assert!(matches!(
            engine.binomial_primary_decomposition(&Ideal::unit(ring)),
            Err(BinomialError::NotProper)
        ));
        assert!(matches!(
            engine.binomial_associated_primes(&ideal(2, &["x0 + x1 - 1"])),
            Err(BinomialError::NotBinomial)
        ));
        assert!(matches!(
            engine.cellular_associated_primes(&ideal(2, &["x0*x1"])),
            Err(BinomialError::NotCellular(_))
        ));
    }
}
