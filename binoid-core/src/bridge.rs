//! Character ↔ Ideal Bridge.
//!
//! A partial character `(L, χ, Δ)` determines the binomial ideal generated by
//! `x^{u+} − χ(u)·x^{u−}` for `u ∈ L`. Conversely a cellular binomial ideal
//! restricted to its cell variables is such an ideal, and its Gröbner basis
//! exposes generators of `L` together with their values.

use crate::cellular::{cell_variables, complement};
use crate::character::PartialCharacter;
use crate::classify::{is_binomial, is_unital};
use crate::error::{BinomialError, Result};
use crate::oracle::LatticeBasisOracle;
use binoid_math::{Cyclo, Ideal, IntMatrix, MathError, Monomial, Polynomial, Ring, Var};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use tracing::{debug, trace};

/// `x^{u+} − value·x^{u−}` for an integer vector `u`.
pub fn lattice_binomial(row: &[BigInt], value: &Cyclo) -> Result<Polynomial> {
    let mut positive = Vec::new();
    let mut negative = Vec::new();
    for (i, e) in row.iter().enumerate() {
        if e.is_zero() {
            continue;
        }
        let power = e
            .abs()
            .to_u32()
            .ok_or_else(|| MathError::ExponentOverflow(format!("x{}^{}", i, e.abs())))?;
        if e.is_positive() {
            positive.push((i as Var, power));
        } else {
            negative.push((i as Var, power));
        }
    }
    Ok(Polynomial::binomial(
        Monomial::from_powers(positive),
        value.clone(),
        Monomial::from_powers(negative),
    ))
}

/// The binomial ideal of a partial character.
///
/// Cases are tried in order: zero lattice, the full identity lattice, a
/// character that is identically one (delegated to the lattice oracle), and
/// the general case of saturating the generator binomials by every variable.
pub fn ideal_from_character(
    character: &PartialCharacter,
    ring: Ring,
    oracle: &dyn LatticeBasisOracle,
) -> Result<Ideal> {
    if character.nvars() != ring.nvars() {
        return Err(BinomialError::DimensionMismatch {
            expected: ring.nvars(),
            found: character.nvars(),
        });
    }
    let lattice = character.lattice();
    if character.is_zero_lattice() {
        return Ok(Ideal::zero(ring));
    }

    if lattice.is_identity() {
        let gens = character
            .values()
            .iter()
            .enumerate()
            .map(|(i, b)| &ring.var(i as Var) - &Polynomial::constant(b.clone()));
        return Ok(Ideal::new(ring, gens));
    }

    if character.values().iter().all(Cyclo::is_one) {
        let basis = oracle.markov_basis(&lattice.without_zero_rows())?;
        debug!(oracle = oracle.name(), size = basis.nrows(), "markov basis");
        let gens = basis
            .rows()
            .map(|row| lattice_binomial(row, &Cyclo::one()))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Ideal::new(ring, gens));
    }

    let mut gens = Vec::with_capacity(lattice.nrows());
    for (row, value) in lattice.rows().zip(character.values()) {
        if row.iter().any(|x| !x.is_zero()) {
            gens.push(lattice_binomial(row, value)?);
        }
    }
    Ok(Ideal::new(ring, gens).cascade_saturation(&ring.vars())?)
}

/// The partial character of a cellular binomial ideal.
pub fn partial_character_from_ideal(ideal: &Ideal) -> Result<PartialCharacter> {
    if !is_binomial(ideal)? {
        return Err(BinomialError::NotBinomial);
    }
    let cells = cell_variables(ideal)?;
    let n = ideal.ring().nvars();
    if cells.is_empty() {
        return Ok(PartialCharacter::trivial(n, Vec::new()));
    }

    let restricted = ideal.eliminate(&complement(n, &cells))?;
    if restricted.is_zero() {
        return Ok(PartialCharacter::trivial(n, cells));
    }

    let mut rows: Vec<Vec<BigInt>> = Vec::new();
    let mut values = Vec::new();
    for g in restricted.groebner_basis()? {
        let [lead, tail] = g.terms() else {
            trace!(element = %g, "skipping non-binomial basis element");
            continue;
        };
        let u: Vec<BigInt> = lead
            .monomial
            .exponents(n)
            .into_iter()
            .zip(tail.monomial.exponents(n))
            .map(|(a, b)| BigInt::from(a) - BigInt::from(b))
            .collect();
        let spanned = if rows.is_empty() {
            u.iter().all(Zero::is_zero)
        } else {
            IntMatrix::from_big_rows(rows.clone(), n)?.contains(&u)?
        };
        if !spanned {
            rows.push(u);
            values.push(-&tail.coeff);
        }
    }

    if rows.is_empty() {
        return Ok(PartialCharacter::trivial(n, cells));
    }
    let lattice = IntMatrix::from_big_rows(rows, n)?;
    PartialCharacter::new(lattice, values, cells)?.normalized()
}

/// The lattice of a unital cellular binomial ideal.
///
/// The character of such an ideal is identically one, so the lattice alone
/// determines it.
pub fn unital_lattice(ideal: &Ideal) -> Result<IntMatrix> {
    if !is_unital(ideal)? {
        return Err(BinomialError::NotUnital);
    }
    let character = partial_character_from_ideal(ideal)?;
    if !character.values().iter().all(Cyclo::is_one) {
        return Err(BinomialError::Internal(format!(
            "unital ideal {} has a nontrivial character",
            ideal
        )));
    }
    Ok(character.lattice().clone())
}
