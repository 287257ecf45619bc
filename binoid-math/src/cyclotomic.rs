//! Cyclotomic Field Arithmetic.
//!
//! Exact elements of the abelian closure of ℚ, restricted to what binomial
//! ideals need: every value lives in some cyclotomic field ℚ(ζₙ) and is
//! stored as a polynomial in ζₙ reduced modulo the cyclotomic polynomial Φₙ:
//!
//! ```text
//! a = a₀ + a₁ζₙ + … + a_{φ(n)-1}ζₙ^{φ(n)-1}
//! ```
//!
//! Binary operations lift both operands into ℚ(ζ_lcm) first, so elements with
//! different conductors mix freely. Rational results always drop back to
//! conductor 1.

use crate::error::{MathError, MathResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rustc_hash::FxHashMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An element of a cyclotomic field ℚ(ζₙ).
#[derive(Clone)]
pub struct Cyclo {
    /// n such that the element lies in ℚ(ζₙ).
    conductor: u32,
    /// Power-basis coefficients, lowest first, no trailing zeros.
    coeffs: Vec<BigRational>,
}

impl Cyclo {
    /// The zero element.
    #[inline]
    pub fn zero() -> Self {
        Self {
            conductor: 1,
            coeffs: Vec::new(),
        }
    }

    /// The one element.
    #[inline]
    pub fn one() -> Self {
        Self::from_rational(BigRational::one())
    }

    /// Embed a rational number.
    pub fn from_rational(q: BigRational) -> Self {
        if q.is_zero() {
            Self::zero()
        } else {
            Self {
                conductor: 1,
                coeffs: vec![q],
            }
        }
    }

    /// Embed an integer.
    pub fn from_integer(n: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// The root of unity ζₙᵏ, with ζₙ = exp(2πi/n).
    pub fn root_of_unity(n: u32, k: i64) -> Self {
        let n = n.max(1);
        let k = k.rem_euclid(i64::from(n)) as usize;
        let mut coeffs = vec![BigRational::zero(); k + 1];
        coeffs[k] = BigRational::one();
        Self::from_power_basis(n, coeffs)
    }

    /// Build an element from (not necessarily reduced) coefficients in ζₙ.
    pub fn from_power_basis(conductor: u32, coeffs: Vec<BigRational>) -> Self {
        let conductor = conductor.max(1);
        let modulus = cyclotomic_modulus(conductor);
        let (_, rem) = poly_divrem(&coeffs, &modulus);
        if rem.len() <= 1 {
            Self {
                conductor: 1,
                coeffs: rem,
            }
        } else {
            Self {
                conductor,
                coeffs: rem,
            }
        }
    }

    /// The conductor n of the field ℚ(ζₙ) this element is stored in.
    #[inline]
    pub fn conductor(&self) -> u32 {
        self.conductor
    }

    /// Power-basis coefficients, lowest first.
    #[inline]
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Returns true for zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true for one.
    pub fn is_one(&self) -> bool {
        self.conductor == 1 && self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Returns true if the element is rational.
    #[inline]
    pub fn is_rational(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// The element as a rational number, if it is one.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self.coeffs.as_slice() {
            [] => Some(BigRational::zero()),
            [q] => Some(q.clone()),
            _ => None,
        }
    }

    /// Coefficients in ζₘ for a multiple m of the conductor, unreduced.
    fn lifted(&self, m: u32) -> Vec<BigRational> {
        let step = (m / self.conductor) as usize;
        if step == 1 {
            return self.coeffs.clone();
        }
        let mut out = vec![BigRational::zero(); (self.coeffs.len().max(1) - 1) * step + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            out[i * step] = c.clone();
        }
        out
    }

    fn combine<F>(&self, other: &Self, op: F) -> Self
    where
        F: Fn(&[BigRational], &[BigRational]) -> Vec<BigRational>,
    {
        if self.conductor == other.conductor {
            return Self::from_power_basis(self.conductor, op(&self.coeffs, &other.coeffs));
        }
        let m = self.conductor.lcm(&other.conductor);
        Self::from_power_basis(m, op(&self.lifted(m), &other.lifted(m)))
    }

    /// Multiplicative inverse.
    ///
    /// Uses the extended Euclidean algorithm in ℚ[x] against Φₙ.
    pub fn inv(&self) -> MathResult<Cyclo> {
        if self.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if let Some(q) = self.to_rational() {
            return Ok(Self::from_rational(q.recip()));
        }

        let modulus = cyclotomic_modulus(self.conductor);
        let (mut r0, mut r1) = (self.coeffs.clone(), modulus);
        let (mut s0, mut s1) = (vec![BigRational::one()], Vec::new());
        while !r1.is_empty() {
            let (q, r) = poly_divrem(&r0, &r1);
            let s = poly_sub(&s0, &poly_mul(&q, &s1));
            r0 = std::mem::replace(&mut r1, r);
            s0 = std::mem::replace(&mut s1, s);
        }

        // Φₙ is irreducible, so the gcd is a nonzero constant.
        match r0.as_slice() {
            [g] if !g.is_zero() => {
                let scale = g.recip();
                let coeffs = s0.into_iter().map(|c| c * &scale).collect();
                Ok(Self::from_power_basis(self.conductor, coeffs))
            }
            _ => Err(MathError::DivisionByZero),
        }
    }

    /// Division by a nonzero element.
    pub fn checked_div(&self, other: &Cyclo) -> MathResult<Cyclo> {
        Ok(self * &other.inv()?)
    }

    /// Integer power; negative exponents invert first.
    pub fn pow(&self, exp: &BigInt) -> MathResult<Cyclo> {
        if exp.is_negative() {
            return self.inv()?.pow(&-exp);
        }
        let two = BigInt::from(2);
        let mut result = Cyclo::one();
        let mut base = self.clone();
        let mut e = exp.clone();
        while !e.is_zero() {
            if e.is_odd() {
                result = &result * &base;
            }
            e /= &two;
            if !e.is_zero() {
                base = &base * &base;
            }
        }
        Ok(result)
    }

    /// Small-integer power.
    pub fn pow_i64(&self, exp: i64) -> MathResult<Cyclo> {
        self.pow(&BigInt::from(exp))
    }

    /// Write the element as `q · ζ_order^k` with `q > 0` rational, if possible.
    ///
    /// The roots of unity of ℚ(ζₙ) all have order dividing lcm(2, n), so a
    /// finite search over that group decides the question.
    pub fn split_root_of_unity(&self) -> Option<(BigRational, u32, u32)> {
        if self.is_zero() {
            return None;
        }
        let n = self.conductor;
        let order = if n % 2 == 0 { n } else { 2 * n };
        for k in 0..order {
            let t = self * &Cyclo::root_of_unity(order, -i64::from(k));
            if let Some(q) = t.to_rational() {
                if q.is_positive() {
                    return Some((q, order, k));
                }
                return Some((-q, order, (k + order / 2) % order));
            }
        }
        None
    }

    /// All d-th roots of this element.
    ///
    /// Supported radicands are roots of unity times a rational that is a perfect
    /// d-th power, or a perfect (d/2)-th power for even d. Anything else
    /// reports [`MathError::NoExactRoot`].
    pub fn roots(&self, degree: u32) -> MathResult<Vec<Cyclo>> {
        if degree == 0 {
            return Err(MathError::InvalidArgument("root of degree 0".to_string()));
        }
        if self.is_zero() {
            return Ok(vec![Cyclo::zero()]);
        }
        let no_root = || MathError::NoExactRoot {
            value: self.to_string(),
            degree,
        };
        let (q, order, k) = self.split_root_of_unity().ok_or_else(no_root)?;
        let r = match rational_nth_root(&q, degree) {
            Some(r) => Cyclo::from_rational(r),
            None if degree % 2 == 0 => {
                let half = rational_nth_root(&q, degree / 2).ok_or_else(no_root)?;
                sqrt_positive_rational(&half).ok_or_else(no_root)?
            }
            None => return Err(no_root()),
        };

        let base = &r * &Cyclo::root_of_unity(order * degree, i64::from(k));
        Ok((0..degree)
            .map(|j| &base * &Cyclo::root_of_unity(degree, i64::from(j)))
            .collect())
    }
}

/// Positive rational d-th root of a positive rational, if it exists.
fn rational_nth_root(q: &BigRational, degree: u32) -> Option<BigRational> {
    let exact = |n: &BigInt| {
        let r = n.nth_root(degree);
        (r.pow(degree) == *n).then_some(r)
    };
    let numer = exact(q.numer())?;
    let denom = exact(q.denom())?;
    Some(BigRational::new(numer, denom))
}

/// Largest prime whose square root is built as a Gauss sum.
const GAUSS_PRIME_BOUND: u64 = 1000;

/// Positive square root of a positive rational as a cyclotomic element.
///
/// `√(a/b) = s·√m / b` with `a·b = s²·m` and `m` squarefree; `√m` is a
/// product of quadratic Gauss sums. `None` when `m` has a prime factor above
/// [`GAUSS_PRIME_BOUND`].
fn sqrt_positive_rational(q: &BigRational) -> Option<Cyclo> {
    if !q.is_positive() {
        return None;
    }
    let mut rest = q.numer() * q.denom();
    let mut square = BigInt::one();
    let mut result = Cyclo::one();

    for p in (2..GAUSS_PRIME_BOUND).filter(|&p| is_small_prime(p)) {
        let bp = BigInt::from(p);
        let mut e = 0u32;
        while (&rest % &bp).is_zero() {
            rest /= &bp;
            e += 1;
        }
        if e > 0 {
            square *= bp.pow(e / 2);
            if e % 2 == 1 {
                result = &result * &sqrt_prime(p);
            }
        }
    }

    let s = rest.sqrt();
    if &s * &s != rest {
        return None;
    }
    square *= s;

    let scale = BigRational::new(square, q.denom().clone());
    Some(&result * &Cyclo::from_rational(scale))
}

fn is_small_prime(n: u64) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// √p for a prime p below [`GAUSS_PRIME_BOUND`].
fn sqrt_prime(p: u64) -> Cyclo {
    if p == 2 {
        return &Cyclo::root_of_unity(8, 1) + &Cyclo::root_of_unity(8, 7);
    }
    let gauss = (0..p).fold(Cyclo::zero(), |acc, k| {
        &acc + &Cyclo::root_of_unity(p as u32, ((k * k) % p) as i64)
    });
    if p % 4 == 1 {
        gauss
    } else {
        // the Gauss sum is i·√p
        &gauss * &Cyclo::root_of_unity(4, 3)
    }
}

/// Integer coefficients of the cyclotomic polynomial Φₙ, lowest first.
///
/// Built bottom-up from xᵈ − 1 = ∏_{e | d} Φₑ.
pub fn cyclotomic_polynomial(n: u32) -> Vec<BigInt> {
    let n = n.max(1);
    let divisors: Vec<u32> = (1..=n).filter(|d| n % d == 0).collect();
    let mut table: FxHashMap<u32, Vec<BigInt>> = FxHashMap::default();
    for &d in &divisors {
        let mut p = vec![BigInt::zero(); d as usize + 1];
        p[0] = -BigInt::one();
        p[d as usize] = BigInt::one();
        for &e in divisors.iter().filter(|&&e| e < d && d % e == 0) {
            if let Some(phi_e) = table.get(&e) {
                p = exact_div_monic(&p, phi_e);
            }
        }
        table.insert(d, p);
    }
    table.remove(&n).unwrap_or_default()
}

fn cyclotomic_modulus(n: u32) -> Vec<BigRational> {
    cyclotomic_polynomial(n)
        .into_iter()
        .map(BigRational::from_integer)
        .collect()
}

/// Exact quotient of integer polynomials by a monic divisor.
fn exact_div_monic(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    if b.is_empty() || a.len() < b.len() {
        return Vec::new();
    }
    let db = b.len() - 1;
    let mut rem = a.to_vec();
    let mut quot = vec![BigInt::zero(); rem.len() - db];
    for i in (0..quot.len()).rev() {
        let c = rem[i + db].clone();
        if !c.is_zero() {
            for (j, bj) in b.iter().enumerate() {
                rem[i + j] -= &c * bj;
            }
        }
        quot[i] = c;
    }
    quot
}

fn trim(coeffs: &mut Vec<BigRational>) {
    while coeffs.last().is_some_and(|c| c.is_zero()) {
        coeffs.pop();
    }
}

fn poly_add(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    let mut out = vec![BigRational::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += c;
    }
    trim(&mut out);
    out
}

fn poly_sub(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    let mut out = vec![BigRational::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] -= c;
    }
    trim(&mut out);
    out
}

fn poly_mul(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![BigRational::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    trim(&mut out);
    out
}

/// Univariate division with remainder; `b` must be nonzero.
fn poly_divrem(a: &[BigRational], b: &[BigRational]) -> (Vec<BigRational>, Vec<BigRational>) {
    let mut rem = a.to_vec();
    trim(&mut rem);
    let mut divisor = b.to_vec();
    trim(&mut divisor);
    let Some(lead) = divisor.last().cloned() else {
        return (Vec::new(), rem);
    };
    if rem.len() < divisor.len() {
        return (Vec::new(), rem);
    }

    let mut quot = vec![BigRational::zero(); rem.len() - divisor.len() + 1];
    while rem.len() >= divisor.len() {
        let shift = rem.len() - divisor.len();
        let c = &rem[rem.len() - 1] / &lead;
        for (j, bj) in divisor.iter().enumerate() {
            rem[shift + j] -= &c * bj;
        }
        quot[shift] = c;
        rem.pop();
        trim(&mut rem);
    }
    trim(&mut quot);
    (quot, rem)
}

impl PartialEq for Cyclo {
    fn eq(&self, other: &Self) -> bool {
        if self.conductor == other.conductor {
            return self.coeffs == other.coeffs;
        }
        (self - other).is_zero()
    }
}

impl Eq for Cyclo {}

impl Default for Cyclo {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Cyclo {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<BigInt> for Cyclo {
    fn from(n: BigInt) -> Self {
        Self::from_rational(BigRational::from_integer(n))
    }
}

impl From<BigRational> for Cyclo {
    fn from(q: BigRational) -> Self {
        Self::from_rational(q)
    }
}

impl Add for &Cyclo {
    type Output = Cyclo;

    fn add(self, other: &Cyclo) -> Cyclo {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Cyclo::from_rational(a + b);
        }
        self.combine(other, poly_add)
    }
}

impl Sub for &Cyclo {
    type Output = Cyclo;

    fn sub(self, other: &Cyclo) -> Cyclo {
        if other.is_zero() {
            return self.clone();
        }
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Cyclo::from_rational(a - b);
        }
        self.combine(other, poly_sub)
    }
}

impl Mul for &Cyclo {
    type Output = Cyclo;

    fn mul(self, other: &Cyclo) -> Cyclo {
        if self.is_zero() || other.is_zero() {
            return Cyclo::zero();
        }
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Cyclo::from_rational(a * b);
        }
        self.combine(other, poly_mul)
    }
}

impl Neg for &Cyclo {
    type Output = Cyclo;

    fn neg(self) -> Cyclo {
        Cyclo {
            conductor: self.conductor,
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl Add for Cyclo {
    type Output = Cyclo;

    fn add(self, other: Cyclo) -> Cyclo {
        &self + &other
    }
}

impl Sub for Cyclo {
    type Output = Cyclo;

    fn sub(self, other: Cyclo) -> Cyclo {
        &self - &other
    }
}

impl Mul for Cyclo {
    type Output = Cyclo;

    fn mul(self, other: Cyclo) -> Cyclo {
        &self * &other
    }
}

impl Neg for Cyclo {
    type Output = Cyclo;

    fn neg(self) -> Cyclo {
        -&self
    }
}

impl fmt::Display for Cyclo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = self.to_rational() {
            return write!(f, "{}", q);
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            match (first, c.is_negative()) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;
            let c = c.abs();
            match i {
                0 => write!(f, "{}", c)?,
                1 if c.is_one() => write!(f, "ζ{}", self.conductor)?,
                1 => write!(f, "{}*ζ{}", c, self.conductor)?,
                _ if c.is_one() => write!(f, "ζ{}^{}", self.conductor, i)?,
                _ => write!(f, "{}*ζ{}^{}", c, self.conductor, i)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Cyclo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
