//! Gröbner Basis Computation
//!
//! Buchberger's algorithm with the two classical pair criteria:
//! - Product criterion: pairs with coprime leading monomials reduce to zero
//! - Chain criterion: a pair (i, j) is skipped when some basis element k has a
//!   leading monomial dividing lcm(i, j) and both (i, k) and (j, k) are no
//!   longer pending
//!
//! Pairs are selected by the normal strategy (smallest lcm degree first).
//! The returned basis is always reduced: minimal, inter-reduced and monic.

use crate::error::MathResult;
use crate::polynomial::{Monomial, MonomialOrder, Polynomial};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Critical pair for S-polynomial computation
#[derive(Debug, Clone)]
pub struct CriticalPair {
    /// First polynomial index
    pub i: usize,
    /// Second polynomial index
    pub j: usize,
    /// LCM of leading monomials
    pub lcm: Monomial,
    /// Degree of LCM
    pub degree: u32,
}

impl Ord for CriticalPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree
            .cmp(&other.degree)
            .then_with(|| self.j.cmp(&other.j))
            .then_with(|| self.i.cmp(&other.i))
    }
}

impl PartialOrd for CriticalPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CriticalPair {
    fn eq(&self, other: &Self) -> bool {
        self.i == other.i && self.j == other.j
    }
}

impl Eq for CriticalPair {}

/// Statistics for Buchberger algorithm
#[derive(Debug, Clone, Default)]
pub struct BuchbergerStats {
    /// S-polynomials formed.
    pub s_polynomials_computed: u64,
    /// S-polynomials that reduced to zero.
    pub zero_reductions: u64,
    /// Pairs dropped by the product criterion.
    pub pairs_eliminated_product: u64,
    /// Pairs dropped by the chain criterion.
    pub pairs_eliminated_chain: u64,
    /// Polynomials appended to the basis.
    pub polynomials_added: u64,
    /// Single reduction steps in normal form computations.
    pub reduction_steps: u64,
}

/// Configuration for Buchberger's algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuchbergerConfig {
    /// Enable product criterion
    pub use_product_criterion: bool,
    /// Enable chain criterion
    pub use_chain_criterion: bool,
}

impl Default for BuchbergerConfig {
    fn default() -> Self {
        Self {
            use_product_criterion: true,
            use_chain_criterion: true,
        }
    }
}

/// Buchberger engine.
pub struct Buchberger {
    config: BuchbergerConfig,
    stats: BuchbergerStats,
}

impl Default for Buchberger {
    fn default() -> Self {
        Self::new()
    }
}

impl Buchberger {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BuchbergerConfig::default())
    }

    /// Create with configuration.
    pub fn with_config(config: BuchbergerConfig) -> Self {
        Self {
            config,
            stats: BuchbergerStats::default(),
        }
    }

    /// Get statistics.
    pub fn stats(&self) -> &BuchbergerStats {
        &self.stats
    }

    /// Reduced Gröbner basis of the ideal generated by `generators`.
    ///
    /// The zero ideal yields an empty basis, the unit ideal yields `[1]`.
    pub fn groebner_basis(
        &mut self,
        generators: &[Polynomial],
        order: &MonomialOrder,
    ) -> MathResult<Vec<Polynomial>> {
        let mut basis: Vec<Polynomial> = Vec::new();
        for g in generators {
            if g.is_zero() {
                continue;
            }
            let g = g.with_order(order).monic()?;
            if g.is_constant() {
                return Ok(vec![Polynomial::one().with_order(order)]);
            }
            basis.push(g);
        }
        if basis.is_empty() {
            return Ok(basis);
        }

        let mut pairs: BinaryHeap<Reverse<CriticalPair>> = BinaryHeap::new();
        let mut pending: FxHashSet<(usize, usize)> = FxHashSet::default();
        for k in 1..basis.len() {
            self.install_pairs(&basis, k, &mut pairs, &mut pending);
        }

        while let Some(Reverse(pair)) = pairs.pop() {
            pending.remove(&(pair.i, pair.j));

            if self.config.use_chain_criterion && self.chain_criterion(&basis, &pair, &pending) {
                self.stats.pairs_eliminated_chain += 1;
                continue;
            }

            self.stats.s_polynomials_computed += 1;
            let s = s_polynomial(&basis[pair.i], &basis[pair.j])?;
            let h = self.normal_form(&s, &basis)?;
            if h.is_zero() {
                self.stats.zero_reductions += 1;
                continue;
            }

            let h = h.monic()?;
            if h.is_constant() {
                return Ok(vec![Polynomial::one().with_order(order)]);
            }
            basis.push(h);
            self.stats.polynomials_added += 1;
            self.install_pairs(&basis, basis.len() - 1, &mut pairs, &mut pending);
        }

        self.reduce_basis(basis, order)
    }

    /// Queue the pairs (i, k) for every i < k that survive the product criterion.
    fn install_pairs(
        &mut self,
        basis: &[Polynomial],
        k: usize,
        pairs: &mut BinaryHeap<Reverse<CriticalPair>>,
        pending: &mut FxHashSet<(usize, usize)>,
    ) {
        let Some(lm_k) = basis[k].leading_monomial() else {
            return;
        };
        for (i, fi) in basis.iter().enumerate().take(k) {
            let Some(lm_i) = fi.leading_monomial() else {
                continue;
            };
            if self.config.use_product_criterion && lm_i.is_coprime(lm_k) {
                self.stats.pairs_eliminated_product += 1;
                continue;
            }
            let lcm = lm_i.lcm(lm_k);
            let degree = lcm.total_degree();
            pending.insert((i, k));
            pairs.push(Reverse(CriticalPair {
                i,
                j: k,
                lcm,
                degree,
            }));
        }
    }

    fn chain_criterion(
        &self,
        basis: &[Polynomial],
        pair: &CriticalPair,
        pending: &FxHashSet<(usize, usize)>,
    ) -> bool {
        let key = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };
        basis.iter().enumerate().any(|(k, fk)| {
            k != pair.i
                && k != pair.j
                && fk
                    .leading_monomial()
                    .is_some_and(|lm| lm.divides(&pair.lcm))
                && !pending.contains(&key(pair.i, k))
                && !pending.contains(&key(pair.j, k))
        })
    }

    /// Full normal form of `f` with respect to `basis`.
    ///
    /// Every term of the result is irreducible by the leading monomials of
    /// `basis`. The result is sorted in the order of the basis elements.
    pub fn normal_form(&mut self, f: &Polynomial, basis: &[Polynomial]) -> MathResult<Polynomial> {
        let order = basis
            .first()
            .map(|g| g.order().clone())
            .unwrap_or_else(|| f.order().clone());
        let mut p = f.with_order(&order);
        let mut remainder = Vec::new();

        while let Some(lt) = p.leading_term().cloned() {
            let divisor = basis.iter().find_map(|g| {
                let lead = g.leading_term()?;
                lt.monomial.div(&lead.monomial).map(|q| (g, lead.coeff.clone(), q))
            });
            match divisor {
                Some((g, lc, q)) => {
                    let c = if lc.is_one() {
                        lt.coeff.clone()
                    } else {
                        lt.coeff.checked_div(&lc)?
                    };
                    p = p.sub_term_multiple(&c, &q, g);
                    self.stats.reduction_steps += 1;
                }
                None => {
                    remainder.push(lt);
                    p = p.tail();
                }
            }
        }

        Ok(Polynomial::from_terms(remainder, order))
    }

    /// Minimalize and inter-reduce a Gröbner basis.
    fn reduce_basis(
        &mut self,
        mut basis: Vec<Polynomial>,
        order: &MonomialOrder,
    ) -> MathResult<Vec<Polynomial>> {
        basis.sort_by(|a, b| compare_leading(order, a, b));

        let mut minimal: Vec<Polynomial> = Vec::new();
        for g in basis {
            let redundant = g.leading_monomial().is_some_and(|lm| {
                minimal
                    .iter()
                    .any(|h| h.leading_monomial().is_some_and(|hm| hm.divides(lm)))
            });
            if !redundant {
                minimal.push(g);
            }
        }

        let mut reduced = Vec::with_capacity(minimal.len());
        for idx in 0..minimal.len() {
            let others: Vec<Polynomial> = minimal
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != idx)
                .map(|(_, g)| g.clone())
                .collect();
            let g = if others.is_empty() {
                minimal[idx].clone()
            } else {
                self.normal_form(&minimal[idx], &others)?
            };
            reduced.push(g.monic()?);
        }
        reduced.sort_by(|a, b| compare_leading(order, a, b));
        Ok(reduced)
    }
}

fn compare_leading(order: &MonomialOrder, a: &Polynomial, b: &Polynomial) -> Ordering {
    match (a.leading_monomial(), b.leading_monomial()) {
        (Some(x), Some(y)) => order.compare(x, y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// S-polynomial of two nonzero polynomials sorted in the same order.
pub fn s_polynomial(f: &Polynomial, g: &Polynomial) -> MathResult<Polynomial> {
    let (Some(lf), Some(lg)) = (f.leading_term(), g.leading_term()) else {
        return Ok(Polynomial::zero().with_order(f.order()));
    };
    let lcm = lf.monomial.lcm(&lg.monomial);
    let mf = lcm.div(&lf.monomial).unwrap_or_else(Monomial::unit);
    let mg = lcm.div(&lg.monomial).unwrap_or_else(Monomial::unit);
    let cf = lf.coeff.inv()?;
    let cg = lg.coeff.inv()?;
    let left = f.mul_term(&cf, &mf);
    Ok(left.sub_term_multiple(&cg, &mg, g))
}

/// Reduced Gröbner basis with the default engine configuration.
pub fn groebner_basis(generators: &[Polynomial], order: &MonomialOrder) -> MathResult<Vec<Polynomial>> {
    Buchberger::new().groebner_basis(generators, order)
}

/// Normal form of `f` modulo a Gröbner basis.
pub fn reduce(f: &Polynomial, basis: &[Polynomial]) -> MathResult<Polynomial> {
    Buchberger::new().normal_form(f, basis)
}

/// Returns true if `f` lies in the ideal with Gröbner basis `basis`.
pub fn ideal_membership(f: &Polynomial, basis: &[Polynomial]) -> MathResult<bool> {
    Ok(reduce(f, basis)?.is_zero())
}

/// Returns true if the basis is `[c]` for a nonzero constant `c`.
pub(crate) fn is_unit_basis(basis: &[Polynomial]) -> bool {
    matches!(basis, [g] if g.is_constant() && !g.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(terms: &[(i64, &[(u32, u32)])]) -> Polynomial {
        Polynomial::from_coeffs_int(terms)
    }

    #[test]
    fn test_buchberger_creation() {
        let engine = Buchberger::new();
        assert_eq!(engine.stats().s_polynomials_computed, 0);
    }

    #[test]
    fn test_unit_and_zero_ideal() {
        let order = MonomialOrder::GRevLex;
        assert!(groebner_basis(&[], &order).unwrap().is_empty());
        assert!(groebner_basis(&[Polynomial::zero()], &order).unwrap().is_empty());

        // x0 - 1 and x0 generate (1)
        let gb = groebner_basis(&[poly(&[(1, &[(0, 1)]), (-1, &[])]), poly(&[(1, &[(0, 1)])])], &order)
            .unwrap();
        assert!(is_unit_basis(&gb));
    }

    #[test]
    fn test_twisted_cubic_lex() {
        // x1^3 - x2^2 lies in (x1 - x0^2, x2 - x0^3)
        let f1 = poly(&[(1, &[(1, 1)]), (-1, &[(0, 2)])]);
        let f2 = poly(&[(1, &[(2, 1)]), (-1, &[(0, 3)])]);
        let gb = groebner_basis(&[f1.clone(), f2.clone()], &MonomialOrder::GRevLex).unwrap();
        let target = poly(&[(1, &[(1, 3)]), (-1, &[(2, 2)])]);
        assert!(ideal_membership(&target, &gb).unwrap());
        assert!(ideal_membership(&f1, &gb).unwrap());
        assert!(!ideal_membership(&poly(&[(1, &[(1, 1)])]), &gb).unwrap());
    }

    #[test]
    fn test_reduced_basis_is_canonical() {
        let order = MonomialOrder::GRevLex;
        let a = poly(&[(1, &[(0, 1)]), (-1, &[(1, 1)])]);
        let b = poly(&[(1, &[(0, 3)]), (-1, &[])]);
        let gb1 = groebner_basis(&[a.clone(), b.clone()], &order).unwrap();
        let sum = &a + &b;
        let gb2 = groebner_basis(&[sum, a, b], &order).unwrap();
        assert_eq!(gb1, gb2);
        for g in &gb1 {
            assert!(g.leading_coeff().is_one());
        }
    }

    #[test]
    fn test_criteria_do_not_change_result() {
        let order = MonomialOrder::GRevLex;
        let gens = vec![
            poly(&[(1, &[(0, 2), (1, 1)]), (-1, &[(2, 1)])]),
            poly(&[(1, &[(0, 1), (1, 2)]), (-1, &[(0, 1)])]),
            poly(&[(1, &[(1, 3)]), (-1, &[(2, 2)])]),
        ];
        let mut plain = Buchberger::with_config(BuchbergerConfig {
            use_product_criterion: false,
            use_chain_criterion: false,
        });
        let mut tuned = Buchberger::new();
        let a = plain.groebner_basis(&gens, &order).unwrap();
        let b = tuned.groebner_basis(&gens, &order).unwrap();
        assert_eq!(a, b);
        assert!(tuned.stats().s_polynomials_computed <= plain.stats().s_polynomials_computed);
    }

    #[test]
    fn test_elimination_order_projects() {
        // eliminate x0 from (x0 - x1, x0 - x2) gives x1 - x2
        let gens = vec![
            poly(&[(1, &[(0, 1)]), (-1, &[(1, 1)])]),
            poly(&[(1, &[(0, 1)]), (-1, &[(2, 1)])]),
        ];
        let order = MonomialOrder::elimination(&[0]);
        let gb = groebner_basis(&gens, &order).unwrap();
        let projected: Vec<_> = gb.iter().filter(|g| !g.contains_var(0)).collect();
        assert_eq!(projected.len(), 1);
        assert_eq!(*projected[0], poly(&[(1, &[(1, 1)]), (-1, &[(2, 1)])]));
    }

    #[test]
    fn test_s_polynomial() {
        let f = poly(&[(1, &[(0, 1), (1, 1)]), (-1, &[])]);
        let g = poly(&[(1, &[(0, 1)]), (-1, &[(1, 1)])]);
        // lcm = x0*x1: f - x1*g = -1 + x1^2
        let s = s_polynomial(&f, &g).unwrap();
        assert_eq!(s, poly(&[(1, &[(1, 2)]), (-1, &[])]));
    }
}
