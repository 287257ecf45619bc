//! Binomial Classifier.
//!
//! A generating set that is not binomial does not prove anything, since the
//! reduced Gröbner basis of a binomial ideal is binomial in every order. Both
//! tests therefore check the raw generators first and fall back to the
//! Gröbner basis.

use crate::error::Result;
use binoid_math::{Ideal, Polynomial};

/// Returns true if `f` has at most two terms.
#[inline]
pub fn is_binomial_poly(f: &Polynomial) -> bool {
    f.num_terms() <= 2
}

/// Returns true if `f` is a monomial or a scalar multiple of `m1 − m2`.
pub fn is_pure_difference(f: &Polynomial) -> bool {
    match f.terms() {
        [] | [_] => true,
        [a, b] => (&a.coeff + &b.coeff).is_zero(),
        _ => false,
    }
}

/// Returns true if the ideal is generated by binomials.
pub fn is_binomial(ideal: &Ideal) -> Result<bool> {
    if ideal.gens().iter().all(is_binomial_poly) {
        return Ok(true);
    }
    Ok(ideal.groebner_basis()?.iter().all(is_binomial_poly))
}

/// Returns true if the ideal is generated by monomials and pure differences of monomials.
pub fn is_unital(ideal: &Ideal) -> Result<bool> {
    if ideal.gens().iter().all(is_pure_difference) {
        return Ok(true);
    }
    Ok(ideal.groebner_basis()?.iter().all(is_pure_difference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use binoid_math::Ring;

    fn ideal(n: usize, gens: &[&str]) -> Ideal {
        Ideal::parse(Ring::new(n), gens).unwrap()
    }

    #[test]
    fn test_binomial_polynomial() {
        assert!(is_binomial_poly(&"x0^2 - 3*x1".parse().unwrap()));
        assert!(is_binomial_poly(&"x0".parse().unwrap()));
        assert!(is_binomial_poly(&Polynomial::zero()));
        assert!(!is_binomial_poly(&"x0 + x1 + 1".parse().unwrap()));
    }

    #[test]
    fn test_binomial_ideal() {
        assert!(is_binomial(&ideal(2, &["x0^2 - x1", "x0*x1"])).unwrap());
        assert!(!is_binomial(&ideal(2, &["x0 + x1 + 1"])).unwrap());
        // trinomial generator, binomial Gröbner basis
        assert!(is_binomial(&ideal(2, &["x0 - x1", "x0 + x1 - 2"])).unwrap());
    }

    #[test]
    fn test_unital() {
        assert!(is_unital(&ideal(2, &["x0^2 - x1", "x0*x1"])).unwrap());
        assert!(is_unital(&ideal(2, &["2*x0 - 2*x1"])).unwrap());
        assert!(!is_unital(&ideal(2, &["x0 - 2*x1"])).unwrap());
        assert!(!is_unital(&ideal(2, &["x0 + x1"])).unwrap());
    }
}
