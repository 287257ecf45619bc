//! Polynomial Ideals.
//!
//! An [`Ideal`] is an immutable set of generators in `K[x0, …, x(n-1)]` over
//! the cyclotomic field, together with a lazily computed reduced Gröbner
//! basis in grevlex. All derived ideals (saturations, quotients,
//! intersections, eliminations) are new values; nothing is mutated in place.
//!
//! Saturation, quotient and intersection are reduced to elimination of one
//! auxiliary variable `t = x_n`:
//! - `I : f^∞ = (I + (1 − t·f)) ∩ K[x]`
//! - `I ∩ J = (t·I + (1 − t)·J) ∩ K[x]`
//! - `I : f = (I ∩ (f)) / f`

use crate::error::{MathError, MathResult};
use crate::grobner::{self, Buchberger};
use crate::polynomial::{Monomial, MonomialOrder, Polynomial, Var};
use std::cell::OnceCell;
use std::fmt;

/// The polynomial ring `K[x0, …, x(n-1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ring {
    nvars: usize,
}

impl Ring {
    /// A ring in `nvars` variables.
    pub fn new(nvars: usize) -> Self {
        Self { nvars }
    }

    /// Number of variables.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// All variables, in index order.
    pub fn vars(&self) -> Vec<Var> {
        (0..self.nvars as Var).collect()
    }

    /// The variable `x_i` as a polynomial.
    pub fn var(&self, i: Var) -> Polynomial {
        Polynomial::from_var(i)
    }

    /// The auxiliary variable used for elimination tricks.
    fn aux(&self) -> Var {
        self.nvars as Var
    }
}

/// A finitely generated ideal.
#[derive(Clone)]
pub struct Ideal {
    ring: Ring,
    gens: Vec<Polynomial>,
    gb: OnceCell<Vec<Polynomial>>,
}

impl Ideal {
    /// The ideal generated by `gens`; zero generators are dropped.
    pub fn new(ring: Ring, gens: impl IntoIterator<Item = Polynomial>) -> Self {
        let order = MonomialOrder::GRevLex;
        Self {
            ring,
            gens: gens
                .into_iter()
                .filter(|g| !g.is_zero())
                .map(|g| g.with_order(&order))
                .collect(),
            gb: OnceCell::new(),
        }
    }

    /// Parse generators written as in [`Polynomial::from_str`](std::str::FromStr).
    pub fn parse(ring: Ring, gens: &[&str]) -> MathResult<Self> {
        let polys = gens
            .iter()
            .map(|g| g.parse::<Polynomial>())
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Self::new(ring, polys))
    }

    /// The zero ideal.
    pub fn zero(ring: Ring) -> Self {
        Self::new(ring, [])
    }

    /// The whole ring.
    pub fn unit(ring: Ring) -> Self {
        Self::new(ring, [Polynomial::one()])
    }

    /// The monomial ideal generated by the given variables.
    pub fn from_vars(ring: Ring, vars: &[Var]) -> Self {
        Self::new(ring, vars.iter().map(|&v| Polynomial::from_var(v)))
    }

    /// The monomial ideal generated by `monomials`.
    pub fn from_monomials(ring: Ring, monomials: impl IntoIterator<Item = Monomial>) -> Self {
        Self::new(ring, monomials.into_iter().map(Polynomial::from_monomial))
    }

    /// The ambient ring.
    #[inline]
    pub fn ring(&self) -> Ring {
        self.ring
    }

    /// The generators as given.
    #[inline]
    pub fn gens(&self) -> &[Polynomial] {
        &self.gens
    }

    /// Reduced Gröbner basis in grevlex, computed once.
    pub fn groebner_basis(&self) -> MathResult<&[Polynomial]> {
        if let Some(gb) = self.gb.get() {
            return Ok(gb);
        }
        let gb = grobner::groebner_basis(&self.gens, &MonomialOrder::GRevLex)?;
        Ok(self.gb.get_or_init(|| gb))
    }

    /// Reduced Gröbner basis for another order.
    pub fn groebner_basis_with(&self, order: &MonomialOrder) -> MathResult<Vec<Polynomial>> {
        if *order == MonomialOrder::GRevLex {
            return Ok(self.groebner_basis()?.to_vec());
        }
        Buchberger::new().groebner_basis(&self.gens, order)
    }

    /// Returns true for the zero ideal.
    pub fn is_zero(&self) -> bool {
        self.gens.is_empty()
    }

    /// Returns true for the whole ring.
    pub fn is_one(&self) -> MathResult<bool> {
        if self.gens.iter().any(|g| g.is_constant()) {
            return Ok(true);
        }
        Ok(grobner::is_unit_basis(self.groebner_basis()?))
    }

    /// Ideal membership.
    pub fn contains(&self, f: &Polynomial) -> MathResult<bool> {
        if f.is_zero() {
            return Ok(true);
        }
        let gb = self.groebner_basis()?;
        if gb.is_empty() {
            return Ok(false);
        }
        grobner::ideal_membership(f, gb)
    }

    /// Normal form of `f` modulo this ideal.
    pub fn reduce(&self, f: &Polynomial) -> MathResult<Polynomial> {
        let gb = self.groebner_basis()?;
        if gb.is_empty() {
            return Ok(f.with_order(&MonomialOrder::GRevLex));
        }
        grobner::reduce(f, gb)
    }

    /// Returns true if `self ⊆ other`.
    pub fn is_subset(&self, other: &Ideal) -> MathResult<bool> {
        self.check_ring(other)?;
        for g in &self.gens {
            if !other.contains(g)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Ideal equality by mutual containment.
    pub fn equals(&self, other: &Ideal) -> MathResult<bool> {
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(self.is_subset(other)? && other.is_subset(self)?)
    }

    /// The sum `self + other`.
    pub fn sum(&self, other: &Ideal) -> MathResult<Ideal> {
        self.check_ring(other)?;
        Ok(self.with_generators(other.gens.iter().cloned()))
    }

    /// The ideal with extra generators appended.
    pub fn with_generators(&self, extra: impl IntoIterator<Item = Polynomial>) -> Ideal {
        Ideal::new(self.ring, self.gens.iter().cloned().chain(extra))
    }

    /// `self ∩ K[x_i : i ∉ vars]`, as an ideal of the same ring.
    pub fn eliminate(&self, vars: &[Var]) -> MathResult<Ideal> {
        if vars.is_empty() {
            return Ok(self.clone());
        }
        let order = MonomialOrder::elimination(vars);
        let gb = Buchberger::new().groebner_basis(&self.gens, &order)?;
        Ok(Ideal::new(
            self.ring,
            gb.into_iter().filter(|g| !g.contains_any_var(vars)),
        ))
    }

    /// Eliminate the auxiliary variable from a generator list.
    fn eliminate_aux(&self, gens: Vec<Polynomial>) -> MathResult<Ideal> {
        let t = self.ring.aux();
        let order = MonomialOrder::elimination(&[t]);
        let gb = Buchberger::new().groebner_basis(&gens, &order)?;
        Ok(Ideal::new(
            self.ring,
            gb.into_iter().filter(|g| !g.contains_var(t)),
        ))
    }

    /// The intersection `self ∩ other`.
    pub fn intersect(&self, other: &Ideal) -> MathResult<Ideal> {
        self.check_ring(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Ideal::zero(self.ring));
        }
        let t = Polynomial::from_var(self.ring.aux());
        let one_minus_t = &Polynomial::one() - &t;
        let gens = self
            .gens
            .iter()
            .map(|f| &t * f)
            .chain(other.gens.iter().map(|g| &one_minus_t * g))
            .collect();
        self.eliminate_aux(gens)
    }

    /// The colon ideal `self : f`.
    pub fn quotient(&self, f: &Polynomial) -> MathResult<Ideal> {
        if f.is_zero() {
            return Ok(Ideal::unit(self.ring));
        }
        if f.is_constant() {
            return Ok(self.clone());
        }
        let principal = Ideal::new(self.ring, [f.clone()]);
        let meet = self.intersect(&principal)?;
        let f = f.with_order(&MonomialOrder::GRevLex);
        let mut gens = Vec::with_capacity(meet.gens.len());
        for h in &meet.gens {
            let q = h.exact_div(&f)?.ok_or_else(|| {
                MathError::InvalidArgument(format!("{} is not a multiple of {}", h, f))
            })?;
            gens.push(q);
        }
        Ok(Ideal::new(self.ring, gens))
    }

    /// The colon ideal `self : other`.
    pub fn quotient_by_ideal(&self, other: &Ideal) -> MathResult<Ideal> {
        self.check_ring(other)?;
        let mut acc = Ideal::unit(self.ring);
        for g in &other.gens {
            acc = acc.intersect(&self.quotient(g)?)?;
        }
        Ok(acc)
    }

    /// The saturation `self : f^∞`.
    pub fn saturation(&self, f: &Polynomial) -> MathResult<Ideal> {
        if f.is_zero() {
            return Ok(Ideal::unit(self.ring));
        }
        if f.is_constant() || self.is_zero() {
            return Ok(self.clone());
        }
        let t = Polynomial::from_var(self.ring.aux());
        let rabinowitsch = &Polynomial::one() - &(&t * f);
        let gens = self
            .gens
            .iter()
            .cloned()
            .chain(std::iter::once(rabinowitsch))
            .collect();
        self.eliminate_aux(gens)
    }

    /// The saturation `self : f^∞` with the least `k` such that it equals `self : f^k`.
    pub fn saturation_with_index(&self, f: &Polynomial) -> MathResult<(Ideal, u32)> {
        let sat = self.saturation(f)?;
        let f = f.with_order(&MonomialOrder::GRevLex);
        let mut multiples: Vec<Polynomial> = sat.gens.clone();
        let mut k = 0u32;
        loop {
            let mut done = true;
            for m in &multiples {
                if !self.contains(m)? {
                    done = false;
                    break;
                }
            }
            if done {
                return Ok((sat, k));
            }
            k = k
                .checked_add(1)
                .ok_or_else(|| MathError::ExponentOverflow("saturation index".to_string()))?;
            multiples = multiples.iter().map(|m| m * &f).collect();
        }
    }

    /// The saturation `self : other^∞`.
    pub fn saturation_by_ideal(&self, other: &Ideal) -> MathResult<Ideal> {
        self.check_ring(other)?;
        if other.is_zero() {
            return Ok(Ideal::unit(self.ring));
        }
        let mut acc = Ideal::unit(self.ring);
        for g in &other.gens {
            acc = acc.intersect(&self.saturation(g)?)?;
        }
        Ok(acc)
    }

    /// Saturate successively by each listed variable.
    pub fn cascade_saturation(&self, vars: &[Var]) -> MathResult<Ideal> {
        let mut acc = self.clone();
        for &v in vars {
            acc = acc.saturation(&Polynomial::from_var(v))?;
        }
        Ok(acc)
    }

    /// The monomial ideal of leading monomials for `order`.
    pub fn leading_ideal(&self, order: &MonomialOrder) -> MathResult<Ideal> {
        let gb = self.groebner_basis_with(order)?;
        Ok(Ideal::from_monomials(
            self.ring,
            gb.iter().filter_map(|g| g.leading_monomial().cloned()),
        ))
    }

    fn check_ring(&self, other: &Ideal) -> MathResult<()> {
        if self.ring != other.ring {
            return Err(MathError::RingMismatch {
                left: self.ring.nvars,
                right: other.ring.nvars,
            });
        }
        Ok(())
    }
}

impl PartialEq for Ideal {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl fmt::Display for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, g) in self.gens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ideal{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal(n: usize, gens: &[&str]) -> Ideal {
        Ideal::parse(Ring::new(n), gens).unwrap()
    }

    fn poly(s: &str) -> Polynomial {
        s.parse().unwrap()
    }

    #[test]
    fn test_zero_and_unit() {
        let r = Ring::new(2);
        assert!(Ideal::zero(r).is_zero());
        assert!(!Ideal::zero(r).is_one().unwrap());
        assert!(Ideal::unit(r).is_one().unwrap());
        assert!(ideal(2, &["x0 - 1", "x0"]).is_one().unwrap());
        assert!(Ideal::zero(r).contains(&Polynomial::zero()).unwrap());
        assert!(!Ideal::zero(r).contains(&poly("x0")).unwrap());
    }

    #[test]
    fn test_membership_and_equality() {
        let a = ideal(2, &["x0^2 - x1^2", "x0 - x1"]);
        let b = ideal(2, &["x0 - x1"]);
        assert_eq!(a, b);
        assert!(a.contains(&poly("x0^3 - x1^3")).unwrap());
        assert!(!a.contains(&poly("x0 + x1")).unwrap());
    }

    #[test]
    fn test_ring_mismatch() {
        let a = ideal(2, &["x0"]);
        let b = ideal(3, &["x0"]);
        assert!(matches!(a.sum(&b), Err(MathError::RingMismatch { .. })));
    }

    #[test]
    fn test_saturation_with_index() {
        // (x0^2 * x1, x0^3) : x0^∞ = (1), reached at x0^3
        let i = ideal(2, &["x0^2*x1", "x0^3"]);
        let (s, k) = i.saturation_with_index(&poly("x0")).unwrap();
        assert!(s.is_one().unwrap());
        assert_eq!(k, 3);

        // (x0*x1) : x1^∞ = (x0) at k = 1
        let j = ideal(2, &["x0*x1"]);
        let (s, k) = j.saturation_with_index(&poly("x1")).unwrap();
        assert_eq!(s, ideal(2, &["x0"]));
        assert_eq!(k, 1);

        // already saturated
        let (s, k) = ideal(2, &["x0 - x1"]).saturation_with_index(&poly("x0")).unwrap();
        assert_eq!(s, ideal(2, &["x0 - x1"]));
        assert_eq!(k, 0);
    }

    #[test]
    fn test_quotient() {
        let i = ideal(3, &["x0*x1", "x0*x2"]);
        assert_eq!(i.quotient(&poly("x0")).unwrap(), ideal(3, &["x1", "x2"]));
        assert_eq!(i.quotient(&poly("x1")).unwrap(), ideal(3, &["x0"]));
        assert!(i.quotient(&Polynomial::zero()).unwrap().is_one().unwrap());
        let by_ideal = i.quotient_by_ideal(&ideal(3, &["x1", "x2"])).unwrap();
        assert_eq!(by_ideal, ideal(3, &["x0"]));
    }

    #[test]
    fn test_intersection() {
        let a = ideal(2, &["x0"]);
        let b = ideal(2, &["x1"]);
        assert_eq!(a.intersect(&b).unwrap(), ideal(2, &["x0*x1"]));
        let c = ideal(2, &["x0 - 1"]);
        let d = ideal(2, &["x0 + 1"]);
        assert_eq!(c.intersect(&d).unwrap(), ideal(2, &["x0^2 - 1"]));
        assert!(a.intersect(&Ideal::zero(Ring::new(2))).unwrap().is_zero());
    }

    #[test]
    fn test_eliminate() {
        let i = ideal(3, &["x0 - x1", "x0 - x2^2"]);
        let e = i.eliminate(&[0]).unwrap();
        assert_eq!(e, ideal(3, &["x1 - x2^2"]));
        assert!(e.gens().iter().all(|g| !g.contains_var(0)));
    }

    #[test]
    fn test_cascade_and_ideal_saturation() {
        let i = ideal(2, &["x0*x1^2", "x0^2*x1"]);
        assert_eq!(i.cascade_saturation(&[0]).unwrap(), ideal(2, &["x1"]));
        assert!(i.cascade_saturation(&[0, 1]).unwrap().is_one().unwrap());
        let s = i.saturation_by_ideal(&ideal(2, &["x0", "x1"])).unwrap();
        assert!(s.is_one().unwrap());
    }

    #[test]
    fn test_leading_ideal() {
        let i = ideal(2, &["x0^2 - x1", "x0*x1 - 1"]);
        let lead = i.leading_ideal(&MonomialOrder::GRevLex).unwrap();
        assert!(lead.gens().iter().all(|g| g.num_terms() == 1));
        for g in i.groebner_basis().unwrap() {
            let lm = Polynomial::from_monomial(g.leading_monomial().unwrap().clone());
            assert!(lead.contains(&lm).unwrap());
        }
    }

    #[test]
    fn test_groebner_cache() {
        let i = ideal(2, &["x0^2 - x1", "x0*x1 - 1"]);
        let first = i.groebner_basis().unwrap().to_vec();
        let second = i.groebner_basis().unwrap();
        assert_eq!(first.as_slice(), second);
    }
}
