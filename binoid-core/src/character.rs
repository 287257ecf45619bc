//! Partial Character Algebra.
//!
//! A partial character is a homomorphism `χ : L → K*` on a sublattice
//! `L ⊆ ℤⁿ`, stored as generator rows `A` of `L` and their images `b`. The
//! cell variables `D` record which coordinates the lattice lives on.
//!
//! Saturation extends `χ` to the saturated lattice `(ℚL) ∩ ℤⁿ`. The extension
//! is not unique: every generator of the saturation takes one of finitely
//! many roots, and each combination is checked against the original values.

use crate::error::{BinomialError, Result};
use binoid_math::{Cyclo, IntMatrix, MathError, Var};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use tracing::trace;

/// Default bound on root combinations tried by [`PartialCharacter::saturations`].
pub const DEFAULT_SATURATION_LIMIT: usize = 1 << 16;

/// A character on a sublattice of ℤⁿ.
#[derive(Debug, Clone)]
pub struct PartialCharacter {
    lattice: IntMatrix,
    values: Vec<Cyclo>,
    cells: Vec<Var>,
}

/// All saturations of a character, with the number of rejected candidates.
#[derive(Debug, Clone)]
pub struct Saturations {
    /// Characters on the saturated lattice extending the input.
    pub characters: Vec<PartialCharacter>,
    /// Root combinations that did not reproduce the input values.
    pub rejected: usize,
}

impl PartialCharacter {
    /// Build from generator rows, their values and the cell variables.
    pub fn new(lattice: IntMatrix, values: Vec<Cyclo>, cells: Vec<Var>) -> Result<Self> {
        if lattice.nrows() != values.len() {
            return Err(BinomialError::DimensionMismatch {
                expected: lattice.nrows(),
                found: values.len(),
            });
        }
        if values.iter().any(Cyclo::is_zero) {
            return Err(MathError::DivisionByZero.into());
        }
        let mut cells = cells;
        cells.sort_unstable();
        cells.dedup();
        Ok(Self {
            lattice,
            values,
            cells,
        })
    }

    /// The trivial character on the zero lattice of ℤⁿ.
    pub fn trivial(nvars: usize, cells: Vec<Var>) -> Self {
        Self {
            lattice: IntMatrix::zeros(1, nvars),
            values: vec![Cyclo::one()],
            cells,
        }
    }

    /// Generator rows.
    pub fn lattice(&self) -> &IntMatrix {
        &self.lattice
    }

    /// Values on the generator rows.
    pub fn values(&self) -> &[Cyclo] {
        &self.values
    }

    /// Cell variables.
    pub fn cells(&self) -> &[Var] {
        &self.cells
    }

    /// Ambient dimension n.
    pub fn nvars(&self) -> usize {
        self.lattice.ncols()
    }

    /// Rank of the lattice.
    pub fn rank(&self) -> usize {
        self.lattice.rank()
    }

    /// Returns true if the lattice is zero.
    pub fn is_zero_lattice(&self) -> bool {
        self.lattice.is_zero()
    }

    /// `∏ bᵢ^{eᵢ}`.
    fn product(values: &[Cyclo], exponents: &[BigInt]) -> Result<Cyclo> {
        let mut acc = Cyclo::one();
        for (b, e) in values.iter().zip(exponents) {
            if !e.is_zero() {
                acc = &acc * &b.pow(e)?;
            }
        }
        Ok(acc)
    }

    /// Evaluate the character at a lattice vector.
    pub fn eval(&self, u: &[BigInt]) -> Result<Cyclo> {
        let coords = self
            .lattice
            .solve_left(u)?
            .ok_or(BinomialError::NotInLattice)?;
        Self::product(&self.values, &coords)
    }

    /// The same character on the Hermite basis of its lattice.
    ///
    /// Values follow the unimodular transform: row `r` of `U·A` gets
    /// `∏ⱼ bⱼ^{U[r,j]}`. The zero lattice normalizes to the trivial character.
    pub fn normalized(&self) -> Result<Self> {
        if self.is_zero_lattice() {
            return Ok(Self::trivial(self.nvars(), self.cells.clone()));
        }
        let (h, u) = self.lattice.hnf_with_transform();
        let rank = (0..h.nrows()).take_while(|&r| !h.is_zero_row(r)).count();
        let rows: Vec<usize> = (0..rank).collect();
        let values = rows
            .iter()
            .map(|&r| Self::product(&self.values, u.row(r)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            lattice: h.select_rows(&rows),
            values,
            cells: self.cells.clone(),
        })
    }

    /// Equal lattices and agreement on the generators of `self`.
    pub fn equals(&self, other: &PartialCharacter) -> Result<bool> {
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        if self.nvars() != other.nvars() || !self.lattice.same_lattice(&other.lattice) {
            return Ok(false);
        }
        for (row, value) in self.lattice.rows().zip(&self.values) {
            if other.eval(row)? != *value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// All extensions to the saturated lattice, with the default candidate limit.
    pub fn saturations(&self) -> Result<Vec<PartialCharacter>> {
        Ok(self.saturations_with_limit(DEFAULT_SATURATION_LIMIT)?.characters)
    }

    /// All extensions to the saturated lattice.
    ///
    /// With `B` the top square block of `HNF(Aᵗ)` and `B·I = d·Id`, the
    /// saturated lattice has basis `S = (Iᵗ·A) / d`. Since `(d/g)·S_k` lies in
    /// `L` for `g = gcd(I[·,k], d)`, each value on `S_k` is a `(d/g)`-th root
    /// of `∏ⱼ bⱼ^{I[j,k]/g}`.
    pub fn saturations_with_limit(&self, limit: usize) -> Result<Saturations> {
        if self.is_zero_lattice() {
            return Ok(Saturations {
                characters: vec![self.clone()],
                rejected: 0,
            });
        }

        let base = self.normalized()?;
        let a = &base.lattice;
        let m = a.nrows();
        let block = a.transpose().hnf().top_left(m, m);
        let (inv, d) = block.pseudo_inverse()?;
        let saturated = inv.transpose().mul(a)?.exact_div(&d)?;

        let mut radicands = Vec::with_capacity(m);
        for k in 0..m {
            let column = inv.column(k);
            let g = column.iter().fold(d.clone(), |acc, x| acc.gcd(x));
            let exponents: Vec<BigInt> = column.iter().map(|x| x / &g).collect();
            let degree = (&d / &g).to_u32().ok_or_else(|| {
                MathError::ExponentOverflow(format!("root of degree {}", &d / &g))
            })?;
            radicands.push((exponents, degree));
        }

        // a nonzero value has exactly `degree` roots of that degree
        let total = radicands
            .iter()
            .try_fold(1usize, |acc, (_, degree)| {
                usize::try_from(*degree).ok().and_then(|n| acc.checked_mul(n))
            })
            .unwrap_or(usize::MAX);
        if total > limit {
            return Err(BinomialError::SaturationLimit {
                candidates: total,
                limit,
            });
        }

        let mut candidates: Vec<Vec<Cyclo>> = Vec::with_capacity(m);
        for (exponents, degree) in &radicands {
            let mu = Self::product(&base.values, exponents)?;
            candidates.push(mu.roots(*degree)?);
        }

        // coordinates of the original generators in the saturated basis
        let coords = self
            .lattice
            .rows()
            .map(|row| {
                saturated.solve_left(row)?.ok_or_else(|| {
                    BinomialError::Internal("generator outside its own saturation".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut characters = Vec::new();
        let mut rejected = 0;
        let mut choice = vec![0usize; m];
        loop {
            let values: Vec<Cyclo> = choice
                .iter()
                .zip(&candidates)
                .map(|(&i, c)| c[i].clone())
                .collect();
            let mut consistent = true;
            for (coord, expected) in coords.iter().zip(&self.values) {
                if Self::product(&values, coord)? != *expected {
                    consistent = false;
                    break;
                }
            }
            if consistent {
                characters.push(PartialCharacter {
                    lattice: saturated.clone(),
                    values,
                    cells: self.cells.clone(),
                });
            } else {
                trace!(?values, "rejected saturation candidate");
                rejected += 1;
            }

            // odometer step
            let mut pos = 0;
            while pos < m {
                choice[pos] += 1;
                if choice[pos] < candidates[pos].len() {
                    break;
                }
                choice[pos] = 0;
                pos += 1;
            }
            if pos == m {
                break;
            }
        }

        if characters.is_empty() {
            return Err(BinomialError::Internal(format!(
                "all {} saturation candidates rejected; values are inconsistent on the lattice",
                rejected
            )));
        }
        Ok(Saturations {
            characters,
            rejected,
        })
    }
}

/// Shorthand for [`PartialCharacter::equals`].
///
/// An error from the exact algebra while comparing counts as "not equal";
/// call `equals` to see it.
impl PartialEq for PartialCharacter {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}
