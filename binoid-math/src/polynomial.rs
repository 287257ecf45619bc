//! Multivariate polynomials over cyclotomic fields.
//!
//! Polynomials are sparse: a sorted list of terms, each a [`Cyclo`]
//! coefficient times a [`Monomial`]. The term list is kept in decreasing
//! order for the polynomial's [`MonomialOrder`], so the leading term is
//! always the first one.

use crate::cyclotomic::Cyclo;
use crate::error::{MathError, MathResult};
use num_bigint::BigInt;
use num_traits::Zero;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::Arc;

/// Variable identifier for polynomials.
pub type Var = u32;

/// Power of a variable (variable, exponent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarPower {
    /// The variable identifier.
    pub var: Var,
    /// The exponent (power) of the variable.
    pub power: u32,
}

impl VarPower {
    /// Create a new variable power.
    #[inline]
    pub fn new(var: Var, power: u32) -> Self {
        Self { var, power }
    }
}

/// A monomial is a product of variables with exponents.
/// Represented as a sorted list of (variable, power) pairs.
/// The unit monomial (1) is represented as an empty list.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Monomial {
    /// Variables with their exponents, sorted by variable index.
    vars: SmallVec<[VarPower; 4]>,
    /// Cached total degree.
    total_degree: u32,
}

impl Monomial {
    /// Create the unit monomial (1).
    #[inline]
    pub fn unit() -> Self {
        Self {
            vars: SmallVec::new(),
            total_degree: 0,
        }
    }

    /// Create a monomial from a single variable with power 1.
    #[inline]
    pub fn from_var(var: Var) -> Self {
        Self::from_var_power(var, 1)
    }

    /// Create a monomial from a single variable with a given power.
    pub fn from_var_power(var: Var, power: u32) -> Self {
        if power == 0 {
            return Self::unit();
        }
        let mut vars = SmallVec::new();
        vars.push(VarPower::new(var, power));
        Self {
            vars,
            total_degree: power,
        }
    }

    /// Create a monomial from a list of (variable, power) pairs.
    /// The input doesn't need to be sorted or normalized.
    pub fn from_powers(powers: impl IntoIterator<Item = (Var, u32)>) -> Self {
        let mut var_powers: FxHashMap<Var, u32> = FxHashMap::default();
        for (var, power) in powers {
            if power > 0 {
                *var_powers.entry(var).or_insert(0) += power;
            }
        }

        let mut vars: SmallVec<[VarPower; 4]> = var_powers
            .into_iter()
            .map(|(v, p)| VarPower::new(v, p))
            .collect();
        vars.sort_by_key(|vp| vp.var);
        Self::from_sorted(vars)
    }

    /// Create a monomial from a dense exponent vector; entry i is the power of xᵢ.
    pub fn from_exponents(exponents: &[u32]) -> Self {
        let vars = exponents
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0)
            .map(|(v, p)| VarPower::new(v as Var, *p))
            .collect();
        Self::from_sorted(vars)
    }

    fn from_sorted(vars: SmallVec<[VarPower; 4]>) -> Self {
        let total_degree = vars.iter().map(|vp| vp.power).sum();
        Self { vars, total_degree }
    }

    /// Dense exponent vector of length `nvars`.
    pub fn exponents(&self, nvars: usize) -> Vec<u32> {
        let mut out = vec![0; nvars];
        for vp in &self.vars {
            if let Some(slot) = out.get_mut(vp.var as usize) {
                *slot = vp.power;
            }
        }
        out
    }

    /// Returns true if this is the unit monomial.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.vars.is_empty()
    }

    /// Returns the total degree of the monomial.
    #[inline]
    pub fn total_degree(&self) -> u32 {
        self.total_degree
    }

    /// Returns the variable-power pairs.
    #[inline]
    pub fn vars(&self) -> &[VarPower] {
        &self.vars
    }

    /// Returns the degree of a specific variable in this monomial.
    pub fn degree(&self, var: Var) -> u32 {
        self.vars
            .iter()
            .find(|vp| vp.var == var)
            .map(|vp| vp.power)
            .unwrap_or(0)
    }

    /// Sum of the exponents of the given variables.
    pub fn degree_in(&self, vars: &[Var]) -> u32 {
        self.vars
            .iter()
            .filter(|vp| vars.contains(&vp.var))
            .map(|vp| vp.power)
            .sum()
    }

    /// Multiply two monomials.
    pub fn mul(&self, other: &Monomial) -> Monomial {
        if self.is_unit() {
            return other.clone();
        }
        if other.is_unit() {
            return self.clone();
        }

        let mut vars: SmallVec<[VarPower; 4]> = SmallVec::new();
        let mut i = 0;
        let mut j = 0;

        while i < self.vars.len() && j < other.vars.len() {
            match self.vars[i].var.cmp(&other.vars[j].var) {
                Ordering::Less => {
                    vars.push(self.vars[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    vars.push(other.vars[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    vars.push(VarPower::new(
                        self.vars[i].var,
                        self.vars[i].power + other.vars[j].power,
                    ));
                    i += 1;
                    j += 1;
                }
            }
        }
        vars.extend_from_slice(&self.vars[i..]);
        vars.extend_from_slice(&other.vars[j..]);

        Monomial {
            vars,
            total_degree: self.total_degree + other.total_degree,
        }
    }

    /// Check if other divides self. Returns the quotient if it does.
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        if other.is_unit() {
            return Some(self.clone());
        }

        let mut vars: SmallVec<[VarPower; 4]> = SmallVec::new();
        let mut j = 0;

        for vp in &self.vars {
            if j < other.vars.len() && other.vars[j].var == vp.var {
                if vp.power < other.vars[j].power {
                    return None;
                }
                let new_power = vp.power - other.vars[j].power;
                if new_power > 0 {
                    vars.push(VarPower::new(vp.var, new_power));
                }
                j += 1;
            } else if j < other.vars.len() && other.vars[j].var < vp.var {
                return None;
            } else {
                vars.push(*vp);
            }
        }

        if j < other.vars.len() {
            return None;
        }

        Some(Self::from_sorted(vars))
    }

    /// Returns true if self divides other.
    pub fn divides(&self, other: &Monomial) -> bool {
        if self.total_degree > other.total_degree {
            return false;
        }
        self.vars.iter().all(|vp| other.degree(vp.var) >= vp.power)
    }

    /// Least common multiple of two monomials.
    pub fn lcm(&self, other: &Monomial) -> Monomial {
        let mut vars: SmallVec<[VarPower; 4]> = SmallVec::new();
        let mut i = 0;
        let mut j = 0;

        while i < self.vars.len() && j < other.vars.len() {
            match self.vars[i].var.cmp(&other.vars[j].var) {
                Ordering::Less => {
                    vars.push(self.vars[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    vars.push(other.vars[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    vars.push(VarPower::new(
                        self.vars[i].var,
                        self.vars[i].power.max(other.vars[j].power),
                    ));
                    i += 1;
                    j += 1;
                }
            }
        }
        vars.extend_from_slice(&self.vars[i..]);
        vars.extend_from_slice(&other.vars[j..]);

        Self::from_sorted(vars)
    }

    /// True if the two monomials share no variable.
    pub fn is_coprime(&self, other: &Monomial) -> bool {
        self.vars
            .iter()
            .all(|vp| other.vars.iter().all(|wp| wp.var != vp.var))
    }

    /// Raise monomial to a power.
    pub fn pow(&self, n: u32) -> Monomial {
        if n == 0 {
            return Monomial::unit();
        }
        let vars = self
            .vars
            .iter()
            .map(|vp| VarPower::new(vp.var, vp.power * n))
            .collect();
        Self::from_sorted(vars)
    }

    /// Lexicographic comparison with x0 > x1 > ….
    pub fn lex_cmp(&self, other: &Monomial) -> Ordering {
        let mut i = 0;
        let mut j = 0;

        while i < self.vars.len() && j < other.vars.len() {
            match self.vars[i].var.cmp(&other.vars[j].var) {
                Ordering::Less => return Ordering::Greater,
                Ordering::Greater => return Ordering::Less,
                Ordering::Equal => match self.vars[i].power.cmp(&other.vars[j].power) {
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                    ord => return ord,
                },
            }
        }

        if i < self.vars.len() {
            Ordering::Greater
        } else if j < other.vars.len() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Reverse lexicographic tie-break: the last variable where the
    /// exponents differ decides, and the smaller exponent wins.
    fn revlex_tail_cmp(&self, other: &Monomial) -> Ordering {
        let mut i = self.vars.len();
        let mut j = other.vars.len();

        while i > 0 && j > 0 {
            let a = self.vars[i - 1];
            let b = other.vars[j - 1];
            match a.var.cmp(&b.var) {
                Ordering::Greater => return Ordering::Less,
                Ordering::Less => return Ordering::Greater,
                Ordering::Equal => match a.power.cmp(&b.power) {
                    Ordering::Equal => {
                        i -= 1;
                        j -= 1;
                    }
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                },
            }
        }

        match (i > 0, j > 0) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Graded lexicographic comparison (total degree first, then lex).
    pub fn grlex_cmp(&self, other: &Monomial) -> Ordering {
        self.total_degree
            .cmp(&other.total_degree)
            .then_with(|| self.lex_cmp(other))
    }

    /// Graded reverse lexicographic comparison.
    pub fn grevlex_cmp(&self, other: &Monomial) -> Ordering {
        self.total_degree
            .cmp(&other.total_degree)
            .then_with(|| self.revlex_tail_cmp(other))
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unit() {
            write!(f, "1")
        } else {
            for (i, vp) in self.vars.iter().enumerate() {
                if i > 0 {
                    write!(f, "*")?;
                }
                if vp.power == 1 {
                    write!(f, "x{}", vp.var)?;
                } else {
                    write!(f, "x{}^{}", vp.var, vp.power)?;
                }
            }
            Ok(())
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A term is a coefficient multiplied by a monomial.
#[derive(Clone, PartialEq, Eq)]
pub struct Term {
    /// The coefficient of the term.
    pub coeff: Cyclo,
    /// The monomial part of the term.
    pub monomial: Monomial,
}

impl Term {
    /// Create a new term.
    #[inline]
    pub fn new(coeff: Cyclo, monomial: Monomial) -> Self {
        Self { coeff, monomial }
    }

    /// Create a constant term.
    #[inline]
    pub fn constant(c: Cyclo) -> Self {
        Self::new(c, Monomial::unit())
    }

    /// Check if this term is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.monomial.is_unit() {
            write!(f, "{}", self.coeff)
        } else if self.coeff.is_one() {
            write!(f, "{:?}", self.monomial)
        } else if self.coeff == Cyclo::from_integer(-1) {
            write!(f, "-{:?}", self.monomial)
        } else if self.coeff.coeffs().iter().filter(|c| !c.is_zero()).count() == 1 {
            write!(f, "{}*{:?}", self.coeff, self.monomial)
        } else {
            write!(f, "({})*{:?}", self.coeff, self.monomial)
        }
    }
}

/// Monomial ordering.
///
/// Variables are ranked x0 > x1 > … in every order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MonomialOrder {
    /// Lexicographic order.
    Lex,
    /// Graded lexicographic order.
    GrLex,
    /// Graded reverse lexicographic order.
    #[default]
    GRevLex,
    /// Block order: total degree in the listed variables first, then grevlex.
    Elimination(Arc<[Var]>),
    /// Weighted degree first (missing weights count as 0), then grevlex.
    Weighted(Arc<[u64]>),
}

impl MonomialOrder {
    /// Elimination order for the given variables.
    pub fn elimination(vars: &[Var]) -> Self {
        MonomialOrder::Elimination(vars.into())
    }

    /// Compare two monomials using this ordering.
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => a.lex_cmp(b),
            MonomialOrder::GrLex => a.grlex_cmp(b),
            MonomialOrder::GRevLex => a.grevlex_cmp(b),
            MonomialOrder::Elimination(vars) => a
                .degree_in(vars)
                .cmp(&b.degree_in(vars))
                .then_with(|| a.grevlex_cmp(b)),
            MonomialOrder::Weighted(weights) => {
                let weigh = |m: &Monomial| -> u64 {
                    m.vars()
                        .iter()
                        .map(|vp| {
                            weights.get(vp.var as usize).copied().unwrap_or(0)
                                * u64::from(vp.power)
                        })
                        .sum()
                };
                weigh(a).cmp(&weigh(b)).then_with(|| a.grevlex_cmp(b))
            }
        }
    }
}

/// A multivariate polynomial over a cyclotomic field.
/// Represented as a sum of terms, sorted by monomial order.
#[derive(Clone)]
pub struct Polynomial {
    /// Terms in decreasing order (according to monomial order).
    terms: Vec<Term>,
    /// The monomial ordering used.
    order: MonomialOrder,
}

impl Polynomial {
    /// Create the zero polynomial.
    #[inline]
    pub fn zero() -> Self {
        Self {
            terms: Vec::new(),
            order: MonomialOrder::default(),
        }
    }

    /// Create the one polynomial.
    #[inline]
    pub fn one() -> Self {
        Self::constant(Cyclo::one())
    }

    /// Create a constant polynomial.
    pub fn constant(c: Cyclo) -> Self {
        Self::term(c, Monomial::unit())
    }

    /// Create a single-term polynomial.
    pub fn term(c: Cyclo, monomial: Monomial) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self {
                terms: vec![Term::new(c, monomial)],
                order: MonomialOrder::default(),
            }
        }
    }

    /// Create a polynomial from a monomial with coefficient 1.
    pub fn from_monomial(monomial: Monomial) -> Self {
        Self::term(Cyclo::one(), monomial)
    }

    /// Create a polynomial from a single variable.
    pub fn from_var(var: Var) -> Self {
        Self::from_monomial(Monomial::from_var(var))
    }

    /// Create a polynomial x^k.
    pub fn from_var_power(var: Var, power: u32) -> Self {
        Self::from_monomial(Monomial::from_var_power(var, power))
    }

    /// The binomial `x^a − c·x^b`.
    pub fn binomial(a: Monomial, c: Cyclo, b: Monomial) -> Self {
        Self::from_terms(
            [Term::new(Cyclo::one(), a), Term::new(-c, b)],
            MonomialOrder::default(),
        )
    }

    /// Create a polynomial from terms. Normalizes and combines like terms.
    pub fn from_terms(terms: impl IntoIterator<Item = Term>, order: MonomialOrder) -> Self {
        let mut poly = Self {
            terms: terms.into_iter().filter(|t| !t.is_zero()).collect(),
            order,
        };
        poly.normalize();
        poly
    }

    /// Create a polynomial from integer coefficients.
    pub fn from_coeffs_int(coeffs: &[(i64, &[(Var, u32)])]) -> Self {
        let terms: Vec<Term> = coeffs
            .iter()
            .map(|(c, powers)| {
                Term::new(
                    Cyclo::from_integer(*c),
                    Monomial::from_powers(powers.iter().copied()),
                )
            })
            .collect();
        Self::from_terms(terms, MonomialOrder::default())
    }

    /// Sort terms and merge like monomials.
    fn normalize(&mut self) {
        if self.terms.len() <= 1 {
            return;
        }
        let order = self.order.clone();
        self.terms
            .sort_by(|a, b| order.compare(&b.monomial, &a.monomial));

        let mut merged: Vec<Term> = Vec::with_capacity(self.terms.len());
        for term in self.terms.drain(..) {
            match merged.last_mut() {
                Some(last) if last.monomial == term.monomial => {
                    last.coeff = &last.coeff + &term.coeff;
                }
                _ => merged.push(term),
            }
        }
        merged.retain(|t| !t.is_zero());
        self.terms = merged;
    }

    /// The same polynomial, terms sorted for another order.
    pub fn with_order(&self, order: &MonomialOrder) -> Self {
        if &self.order == order {
            return self.clone();
        }
        let mut poly = Self {
            terms: self.terms.clone(),
            order: order.clone(),
        };
        poly.normalize();
        poly
    }

    /// The monomial order the terms are sorted by.
    #[inline]
    pub fn order(&self) -> &MonomialOrder {
        &self.order
    }

    /// Terms in decreasing order.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms.
    #[inline]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Check if the polynomial is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if the polynomial is a constant (including zero).
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|t| t.monomial.is_unit())
    }

    /// The leading term, if nonzero.
    #[inline]
    pub fn leading_term(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// The leading monomial, if nonzero.
    #[inline]
    pub fn leading_monomial(&self) -> Option<&Monomial> {
        self.terms.first().map(|t| &t.monomial)
    }

    /// The leading coefficient (zero for the zero polynomial).
    pub fn leading_coeff(&self) -> Cyclo {
        self.terms
            .first()
            .map(|t| t.coeff.clone())
            .unwrap_or_else(Cyclo::zero)
    }

    /// Total degree (0 for the zero polynomial).
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|t| t.monomial.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Returns true if any term involves `var`.
    pub fn contains_var(&self, var: Var) -> bool {
        self.terms.iter().any(|t| t.monomial.degree(var) > 0)
    }

    /// Returns true if any term involves one of `vars`.
    pub fn contains_any_var(&self, vars: &[Var]) -> bool {
        self.terms.iter().any(|t| t.monomial.degree_in(vars) > 0)
    }

    /// Multiply by a constant.
    pub fn scale(&self, c: &Cyclo) -> Self {
        if c.is_zero() {
            return Self {
                terms: Vec::new(),
                order: self.order.clone(),
            };
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(&t.coeff * c, t.monomial.clone()))
                .collect(),
            order: self.order.clone(),
        }
    }

    /// Multiply by `c · m`; term order is preserved by monomial multiplication.
    pub fn mul_term(&self, c: &Cyclo, m: &Monomial) -> Self {
        if c.is_zero() {
            return Self {
                terms: Vec::new(),
                order: self.order.clone(),
            };
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(&t.coeff * c, t.monomial.mul(m)))
                .collect(),
            order: self.order.clone(),
        }
    }

    /// The polynomial without its leading term.
    pub fn tail(&self) -> Self {
        Self {
            terms: self.terms.iter().skip(1).cloned().collect(),
            order: self.order.clone(),
        }
    }

    /// Divide by the leading coefficient.
    pub fn monic(&self) -> MathResult<Self> {
        match self.terms.first() {
            None => Ok(self.clone()),
            Some(t) if t.coeff.is_one() => Ok(self.clone()),
            Some(t) => Ok(self.scale(&t.coeff.inv()?)),
        }
    }

    /// `self − c·m·g`, merging the sorted term lists.
    pub fn sub_term_multiple(&self, c: &Cyclo, m: &Monomial, g: &Polynomial) -> Self {
        let g = g.with_order(&self.order);
        let shifted = g.mul_term(&-c, m);
        self.merge_add(&shifted)
    }

    /// Merge-add two polynomials sorted in the same order.
    fn merge_add(&self, other: &Polynomial) -> Self {
        let order = &self.order;
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        let mut i = 0;
        let mut j = 0;
        while i < self.terms.len() && j < other.terms.len() {
            let a = &self.terms[i];
            let b = &other.terms[j];
            match order.compare(&a.monomial, &b.monomial) {
                Ordering::Greater => {
                    terms.push(a.clone());
                    i += 1;
                }
                Ordering::Less => {
                    terms.push(b.clone());
                    j += 1;
                }
                Ordering::Equal => {
                    let c = &a.coeff + &b.coeff;
                    if !c.is_zero() {
                        terms.push(Term::new(c, a.monomial.clone()));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        terms.extend_from_slice(&self.terms[i..]);
        terms.extend_from_slice(&other.terms[j..]);
        Self {
            terms,
            order: order.clone(),
        }
    }

    /// Raise to a non-negative power.
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Polynomial::one().with_order(&self.order);
        for _ in 0..n {
            result = &result * self;
        }
        result
    }

    /// Division with remainder by a single polynomial in this order.
    ///
    /// Returns `(q, r)` with `self = q·d + r` and no term of `r` divisible by
    /// the leading monomial of `d`.
    pub fn div_rem(&self, d: &Polynomial) -> MathResult<(Polynomial, Polynomial)> {
        let d = d.with_order(&self.order);
        let Some(lead) = d.leading_term().cloned() else {
            return Err(MathError::DivisionByZero);
        };
        let lead_inv = lead.coeff.inv()?;

        let mut quotient: Vec<Term> = Vec::new();
        let mut remainder: Vec<Term> = Vec::new();
        let mut p = self.clone();
        while let Some(t) = p.terms.first().cloned() {
            match t.monomial.div(&lead.monomial) {
                Some(m) => {
                    let c = &t.coeff * &lead_inv;
                    p = p.sub_term_multiple(&c, &m, &d);
                    quotient.push(Term::new(c, m));
                }
                None => {
                    remainder.push(t);
                    p.terms.remove(0);
                }
            }
        }
        Ok((
            Polynomial::from_terms(quotient, self.order.clone()),
            Polynomial::from_terms(remainder, self.order.clone()),
        ))
    }

    /// Exact quotient `self / d`, if `d` divides `self`.
    pub fn exact_div(&self, d: &Polynomial) -> MathResult<Option<Polynomial>> {
        let (q, r) = self.div_rem(d)?;
        Ok(r.is_zero().then_some(q))
    }

    /// Format with variable names `x0, x1, …`.
    fn fmt_terms(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, t) in self.terms.iter().enumerate() {
            let text = format!("{:?}", t);
            if i == 0 {
                write!(f, "{}", text)?;
            } else if let Some(rest) = text.strip_prefix('-') {
                write!(f, " - {}", rest)?;
            } else {
                write!(f, " + {}", text)?;
            }
        }
        Ok(())
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        if self.terms.len() != other.terms.len() {
            return false;
        }
        if self.order == other.order {
            return self.terms == other.terms;
        }
        self.with_order(&other.order).terms == other.terms
    }
}

impl Eq for Polynomial {}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_terms(f)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_terms(f)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        self.merge_add(&other.with_order(&self.order))
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &Polynomial) -> Polynomial {
        self.merge_add(&(-other).with_order(&self.order))
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(-&t.coeff, t.monomial.clone()))
                .collect(),
            order: self.order.clone(),
        }
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(Term::new(&a.coeff * &b.coeff, a.monomial.mul(&b.monomial)));
            }
        }
        Polynomial::from_terms(terms, self.order.clone())
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, other: Polynomial) -> Polynomial {
        &self + &other
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, other: Polynomial) -> Polynomial {
        &self - &other
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, other: Polynomial) -> Polynomial {
        &self * &other
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

/// Parses integer-coefficient polynomials written as sums of products, e.g.
/// `x4*x0^3 - x4*x1^3` or `2*x0^2 - 1`. Variables are `x` followed by an index.
impl FromStr for Polynomial {
    type Err = MathError;

    fn from_str(input: &str) -> MathResult<Self> {
        let bad = |msg: &str| MathError::InvalidArgument(format!("{msg} in `{input}`"));
        let text: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
        if text.is_empty() {
            return Err(bad("empty polynomial"));
        }

        let mut terms = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let mut sign = 1i64;
            while pos < text.len() && (text[pos] == '+' || text[pos] == '-') {
                if text[pos] == '-' {
                    sign = -sign;
                }
                pos += 1;
            }

            let mut coeff = BigInt::from(sign);
            let mut powers: Vec<(Var, u32)> = Vec::new();
            loop {
                match text.get(pos) {
                    Some(c) if c.is_ascii_digit() => {
                        let (n, next) = read_digits(&text, pos);
                        coeff *= n.parse::<BigInt>().map_err(|_| bad("bad coefficient"))?;
                        pos = next;
                    }
                    Some('x') => {
                        let (idx, next) = read_digits(&text, pos + 1);
                        let var = idx.parse::<Var>().map_err(|_| bad("bad variable"))?;
                        pos = next;
                        let mut power = 1u32;
                        if text.get(pos) == Some(&'^') {
                            let (e, next) = read_digits(&text, pos + 1);
                            power = e.parse().map_err(|_| bad("bad exponent"))?;
                            pos = next;
                        }
                        powers.push((var, power));
                    }
                    _ => return Err(bad("expected a number or a variable")),
                }
                if text.get(pos) == Some(&'*') {
                    pos += 1;
                } else {
                    break;
                }
            }
            if pos < text.len() && text[pos] != '+' && text[pos] != '-' {
                return Err(bad("unexpected character"));
            }
            terms.push(Term::new(Cyclo::from(coeff), Monomial::from_powers(powers)));
        }
        Ok(Polynomial::from_terms(terms, MonomialOrder::default()))
    }
}

fn read_digits(text: &[char], start: usize) -> (String, usize) {
    let end = text[start.min(text.len())..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(text.len(), |n| start + n);
    (text[start.min(text.len())..end].iter().collect(), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(powers: &[(Var, u32)]) -> Monomial {
        Monomial::from_powers(powers.iter().copied())
    }

    #[test]
    fn test_monomial_arithmetic() {
        let a = mono(&[(0, 2), (1, 3)]);
        let b = mono(&[(0, 1), (1, 4), (2, 1)]);
        assert_eq!(a.lcm(&b), mono(&[(0, 2), (1, 4), (2, 1)]));
        assert_eq!(a.mul(&b), mono(&[(0, 3), (1, 7), (2, 1)]));
        assert!(mono(&[(0, 1)]).divides(&a));
        assert!(!b.divides(&a));
        assert_eq!(a.div(&mono(&[(1, 1)])), Some(mono(&[(0, 2), (1, 2)])));
        assert_eq!(a.div(&mono(&[(2, 1)])), None);
        assert!(mono(&[(0, 1)]).is_coprime(&mono(&[(1, 2)])));
    }

    #[test]
    fn test_exponent_vectors() {
        let m = Monomial::from_exponents(&[1, 0, 3]);
        assert_eq!(m.exponents(4), vec![1, 0, 3, 0]);
        assert_eq!(m.total_degree(), 4);
    }

    #[test]
    fn test_grevlex_order() {
        let order = MonomialOrder::GRevLex;
        // x0*x2 < x1^2 in grevlex with x0 > x1 > x2
        assert_eq!(
            order.compare(&mono(&[(0, 1), (2, 1)]), &mono(&[(1, 2)])),
            Ordering::Less
        );
        assert_eq!(
            order.compare(&mono(&[(0, 2)]), &mono(&[(0, 1), (1, 1)])),
            Ordering::Greater
        );
        assert_eq!(
            order.compare(&mono(&[(0, 1)]), &mono(&[(1, 1), (2, 1)])),
            Ordering::Less
        );
    }

    #[test]
    fn test_lex_and_elimination_orders() {
        let x0 = mono(&[(0, 1)]);
        let x1_cubed = mono(&[(1, 3)]);
        assert_eq!(MonomialOrder::Lex.compare(&x0, &x1_cubed), Ordering::Greater);
        assert_eq!(MonomialOrder::GRevLex.compare(&x0, &x1_cubed), Ordering::Less);
        let elim = MonomialOrder::elimination(&[0]);
        assert_eq!(elim.compare(&x0, &x1_cubed), Ordering::Greater);
    }

    #[test]
    fn test_polynomial_arithmetic() {
        // (x0 - x1)(x0 + x1) = x0^2 - x1^2
        let p = Polynomial::from_coeffs_int(&[(1, &[(0, 1)]), (-1, &[(1, 1)])]);
        let q = Polynomial::from_coeffs_int(&[(1, &[(0, 1)]), (1, &[(1, 1)])]);
        let expected = Polynomial::from_coeffs_int(&[(1, &[(0, 2)]), (-1, &[(1, 2)])]);
        assert_eq!(&p * &q, expected);
        assert!((&p - &p).is_zero());
        assert_eq!((&p + &q).num_terms(), 1);
    }

    #[test]
    fn test_leading_term_follows_order() {
        let p = Polynomial::from_coeffs_int(&[(1, &[(0, 1)]), (1, &[(1, 3)])]);
        assert_eq!(p.leading_monomial(), Some(&mono(&[(1, 3)])));
        let lex = p.with_order(&MonomialOrder::Lex);
        assert_eq!(lex.leading_monomial(), Some(&mono(&[(0, 1)])));
        assert_eq!(p, lex);
    }

    #[test]
    fn test_exact_division() {
        // (x0^3 - 1) / (x0 - 1) = x0^2 + x0 + 1
        let num = Polynomial::from_coeffs_int(&[(1, &[(0, 3)]), (-1, &[])]);
        let den = Polynomial::from_coeffs_int(&[(1, &[(0, 1)]), (-1, &[])]);
        let q = num.exact_div(&den).unwrap().unwrap();
        let expected =
            Polynomial::from_coeffs_int(&[(1, &[(0, 2)]), (1, &[(0, 1)]), (1, &[])]);
        assert_eq!(q, expected);

        let other = Polynomial::from_coeffs_int(&[(1, &[(0, 1)]), (1, &[])]);
        assert_eq!(num.exact_div(&other).unwrap(), None);
        assert!(num.div_rem(&Polynomial::zero()).is_err());
    }

    #[test]
    fn test_binomial_constructor() {
        let z = Cyclo::root_of_unity(3, 1);
        let b = Polynomial::binomial(mono(&[(0, 1)]), z.clone(), mono(&[(1, 1)]));
        assert_eq!(b.num_terms(), 2);
        assert!(b.leading_coeff().is_one());
        assert_eq!(b.terms()[1].coeff, -z);
    }

    #[test]
    fn test_display() {
        let p = Polynomial::from_coeffs_int(&[(1, &[(0, 2)]), (-3, &[(1, 1)]), (2, &[])]);
        assert_eq!(p.to_string(), "x0^2 - 3*x1 + 2");

        let twist = Polynomial::binomial(
            Monomial::from_var(0),
            Cyclo::root_of_unity(4, 1),
            Monomial::from_var(1),
        );
        assert_eq!(twist.to_string(), "x0 - ζ4*x1");
        let cube = Polynomial::binomial(
            Monomial::from_var(0),
            Cyclo::root_of_unity(3, 2),
            Monomial::from_var(1),
        );
        assert_eq!(cube.to_string(), "x0 + (1 + ζ3)*x1");
    }

    #[test]
    fn test_parse() {
        let p: Polynomial = "x4*x0^3 - x4*x1^3".parse().unwrap();
        let q = Polynomial::from_coeffs_int(&[(1, &[(0, 3), (4, 1)]), (-1, &[(1, 3), (4, 1)])]);
        assert_eq!(p, q);
        let r: Polynomial = "-2*x0^2 + 3 - x1".parse().unwrap();
        assert_eq!(r.to_string(), "-2*x0^2 - x1 + 3");
        assert!("x0 +* x1".parse::<Polynomial>().is_err());
        assert!("y".parse::<Polynomial>().is_err());
    }
}
