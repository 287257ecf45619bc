//! In-process lattice oracle.
//!
//! The lattice ideal is the saturation of the basis binomials by the product
//! of all variables. Its reduced Gröbner basis is read off as exponent
//! differences `exp(lm) − exp(tail)`.

use super::LatticeBasisOracle;
use crate::bridge::lattice_binomial;
use crate::error::{BinomialError, Result};
use binoid_math::{
    Buchberger, BuchbergerConfig, Cyclo, Ideal, IntMatrix, MathError, MonomialOrder, Polynomial,
    Ring,
};
use num_bigint::BigInt;
use num_traits::Zero;
use tracing::debug;

/// Lattice oracle computing in the crate's own polynomial algebra.
#[derive(Debug, Clone, Default)]
pub struct SaturationOracle {
    config: BuchbergerConfig,
}

impl SaturationOracle {
    /// Create with the default Buchberger configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a Buchberger configuration for the final basis.
    pub fn with_config(config: BuchbergerConfig) -> Self {
        Self { config }
    }

    fn lattice_ideal(&self, lattice: &IntMatrix) -> Result<Ideal> {
        let ring = Ring::new(lattice.ncols());
        let gens = lattice
            .rows()
            .filter(|row| row.iter().any(|x| !x.is_zero()))
            .map(|row| lattice_binomial(row, &Cyclo::one()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Ideal::new(ring, gens).cascade_saturation(&ring.vars())?)
    }

    fn basis_rows(&self, ideal: &Ideal, order: &MonomialOrder) -> Result<IntMatrix> {
        let mut engine = Buchberger::with_config(self.config.clone());
        let gb = engine.groebner_basis(ideal.gens(), order)?;
        debug!(
            size = gb.len(),
            s_polynomials = engine.stats().s_polynomials_computed,
            "lattice ideal basis"
        );
        exponent_rows(&gb, ideal.ring().nvars())
    }
}

/// Exponent differences of the binomials of a basis.
fn exponent_rows(basis: &[Polynomial], nvars: usize) -> Result<IntMatrix> {
    let mut rows = Vec::with_capacity(basis.len());
    for g in basis {
        let [lead, tail] = g.terms() else {
            return Err(BinomialError::Internal(format!(
                "lattice ideal basis element {} is not a binomial",
                g
            )));
        };
        let a = lead.monomial.exponents(nvars);
        let b = tail.monomial.exponents(nvars);
        rows.push(
            a.iter()
                .zip(&b)
                .map(|(&x, &y)| BigInt::from(x) - BigInt::from(y))
                .collect(),
        );
    }
    Ok(IntMatrix::from_big_rows(rows, nvars)?)
}

impl LatticeBasisOracle for SaturationOracle {
    fn name(&self) -> &str {
        "native"
    }

    /// An inclusion-minimal subset of the reduced grevlex basis.
    fn markov_basis(&self, lattice: &IntMatrix) -> Result<IntMatrix> {
        let ideal = self.lattice_ideal(lattice)?;
        let gb = ideal.groebner_basis()?.to_vec();
        let ring = ideal.ring();

        let mut kept: Vec<Polynomial> = gb;
        let mut i = 0;
        while i < kept.len() {
            let others: Vec<Polynomial> = kept
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, g)| g.clone())
                .collect();
            if !others.is_empty() && Ideal::new(ring, others).contains(&kept[i])? {
                kept.remove(i);
            } else {
                i += 1;
            }
        }
        exponent_rows(&kept, ring.nvars())
    }

    fn lattice_groebner_basis(&self, lattice: &IntMatrix, cost: &[i64]) -> Result<IntMatrix> {
        if cost.len() != lattice.ncols() {
            return Err(BinomialError::DimensionMismatch {
                expected: lattice.ncols(),
                found: cost.len(),
            });
        }
        let weights = cost
            .iter()
            .map(|&c| {
                u64::try_from(c).map_err(|_| {
                    MathError::InvalidArgument(format!("negative cost entry {}", c))
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let ideal = self.lattice_ideal(lattice)?;
        self.basis_rows(&ideal, &MonomialOrder::Weighted(weights.into()))
    }
}
