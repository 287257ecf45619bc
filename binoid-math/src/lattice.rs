//! Integer Lattice Linear Algebra.
//!
//! Dense matrices over ℤ whose rows generate sublattices of ℤⁿ. The central
//! routine is the row-style Hermite normal form `U·A = H`, with `U`
//! unimodular and `H` in row echelon form with positive pivots and entries
//! above each pivot reduced into `[0, pivot)`. Everything else (rank,
//! integral left solve, lattice equality) is read off from it.

use crate::error::{MathError, MathResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A dense integer matrix, row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IntMatrix {
    rows: usize,
    cols: usize,
    data: Vec<BigInt>,
}

impl IntMatrix {
    /// The `rows × cols` zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![BigInt::zero(); rows * cols],
        }
    }

    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = BigInt::one();
        }
        m
    }

    /// Build from rows of machine integers.
    pub fn from_rows(rows: &[Vec<i64>]) -> MathResult<Self> {
        Self::from_big_rows(
            rows.iter()
                .map(|r| r.iter().map(|&x| BigInt::from(x)).collect())
                .collect(),
            rows.first().map_or(0, Vec::len),
        )
    }

    /// Build from rows of big integers; `cols` fixes the width of an empty matrix.
    pub fn from_big_rows(rows: Vec<Vec<BigInt>>, cols: usize) -> MathResult<Self> {
        let cols = rows.first().map_or(cols, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let nrows = rows.len();
        for row in rows {
            if row.len() != cols {
                return Err(MathError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: nrows,
            cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Entry at `(r, c)`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> &BigInt {
        &self.data[r * self.cols + c]
    }

    /// Overwrite the entry at `(r, c)`.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: BigInt) {
        self.data[r * self.cols + c] = value;
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[BigInt] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[BigInt]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Column `c` as an owned vector.
    pub fn column(&self, c: usize) -> Vec<BigInt> {
        (0..self.rows).map(|r| self.get(r, c).clone()).collect()
    }

    /// Returns true if every entry is zero (including the empty matrix).
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Zero::is_zero)
    }

    /// Returns true if row `r` is zero.
    pub fn is_zero_row(&self, r: usize) -> bool {
        self.row(r).iter().all(Zero::is_zero)
    }

    /// Returns true for a square identity matrix.
    pub fn is_identity(&self) -> bool {
        self.rows == self.cols
            && (0..self.rows).all(|r| {
                self.row(r)
                    .iter()
                    .enumerate()
                    .all(|(c, x)| if r == c { x.is_one() } else { x.is_zero() })
            })
    }

    /// The transpose.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.data[c * self.rows + r] = self.get(r, c).clone();
            }
        }
        t
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &IntMatrix) -> MathResult<IntMatrix> {
        if self.cols != other.rows {
            return Err(MathError::DimensionMismatch {
                expected: self.cols,
                found: other.rows,
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(r, k);
                if a.is_zero() {
                    continue;
                }
                for c in 0..other.cols {
                    out.data[r * other.cols + c] += a * other.get(k, c);
                }
            }
        }
        Ok(out)
    }

    /// The matrix made of the given rows, in order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * self.cols);
        for &r in rows {
            data.extend_from_slice(self.row(r));
        }
        Self {
            rows: rows.len(),
            cols: self.cols,
            data,
        }
    }

    /// The top-left `rows × cols` block.
    pub fn top_left(&self, rows: usize, cols: usize) -> Self {
        let mut out = Self::zeros(rows, cols);
        for r in 0..rows.min(self.rows) {
            for c in 0..cols.min(self.cols) {
                out.data[r * cols + c] = self.get(r, c).clone();
            }
        }
        out
    }

    /// The same matrix without its zero rows.
    pub fn without_zero_rows(&self) -> Self {
        let keep: Vec<usize> = (0..self.rows).filter(|&r| !self.is_zero_row(r)).collect();
        self.select_rows(&keep)
    }

    /// Divide every entry by `d`, failing unless all divisions are exact.
    pub fn exact_div(&self, d: &BigInt) -> MathResult<Self> {
        if d.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let mut data = Vec::with_capacity(self.data.len());
        for x in &self.data {
            let (q, r) = x.div_rem(d);
            if !r.is_zero() {
                return Err(MathError::InvalidArgument(format!(
                    "{} is not divisible by {}",
                    x, d
                )));
            }
            data.push(q);
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    fn negate_row(&mut self, r: usize) {
        for x in &mut self.data[r * self.cols..(r + 1) * self.cols] {
            *x = -&*x;
        }
    }

    /// `row[target] -= q · row[source]`.
    fn sub_row_multiple(&mut self, target: usize, source: usize, q: &BigInt) {
        if q.is_zero() {
            return;
        }
        for c in 0..self.cols {
            let delta = q * &self.data[source * self.cols + c];
            self.data[target * self.cols + c] -= delta;
        }
    }

    /// Replace rows `(a, b)` by `(x·a + y·b, u·a + v·b)`.
    fn combine_rows(&mut self, a: usize, b: usize, coeffs: [&BigInt; 4]) {
        let [x, y, u, v] = coeffs;
        for c in 0..self.cols {
            let ra = self.data[a * self.cols + c].clone();
            let rb = self.data[b * self.cols + c].clone();
            self.data[a * self.cols + c] = x * &ra + y * &rb;
            self.data[b * self.cols + c] = u * &ra + v * &rb;
        }
    }

    /// Row-style Hermite normal form with unimodular transform.
    ///
    /// Returns `(H, U)` with `U·self = H`. Nonzero rows of `H` come first,
    /// pivots are positive and strictly move right, entries above a pivot
    /// lie in `[0, pivot)`.
    pub fn hnf_with_transform(&self) -> (IntMatrix, IntMatrix) {
        let mut h = self.clone();
        let mut u = Self::identity(self.rows);
        let mut pivot_row = 0;

        for col in 0..self.cols {
            if pivot_row == self.rows {
                break;
            }
            for r in pivot_row + 1..self.rows {
                let b = h.get(r, col).clone();
                if b.is_zero() {
                    continue;
                }
                let a = h.get(pivot_row, col).clone();
                let (g, x, y) = extended_gcd(&a, &b);
                let ua = -(&b / &g);
                let ub = &a / &g;
                h.combine_rows(pivot_row, r, [&x, &y, &ua, &ub]);
                u.combine_rows(pivot_row, r, [&x, &y, &ua, &ub]);
            }

            let pivot = h.get(pivot_row, col).clone();
            if pivot.is_zero() {
                continue;
            }
            if pivot.is_negative() {
                h.negate_row(pivot_row);
                u.negate_row(pivot_row);
            }
            let pivot = h.get(pivot_row, col).clone();
            for r in 0..pivot_row {
                let q = h.get(r, col).div_floor(&pivot);
                h.sub_row_multiple(r, pivot_row, &q);
                u.sub_row_multiple(r, pivot_row, &q);
            }
            pivot_row += 1;
        }

        (h, u)
    }

    /// Hermite normal form (zero rows kept at the bottom).
    pub fn hnf(&self) -> IntMatrix {
        self.hnf_with_transform().0
    }

    /// Canonical basis of the row lattice: the HNF without zero rows.
    pub fn lattice_basis(&self) -> IntMatrix {
        self.hnf().without_zero_rows()
    }

    /// Rank over ℚ.
    pub fn rank(&self) -> usize {
        let h = self.hnf();
        (0..h.rows).filter(|&r| !h.is_zero_row(r)).count()
    }

    /// Returns true if both row lattices coincide.
    pub fn same_lattice(&self, other: &IntMatrix) -> bool {
        self.cols == other.cols && self.lattice_basis() == other.lattice_basis()
    }

    /// Integral row vector `s` with `s · self = target`, if one exists.
    pub fn solve_left(&self, target: &[BigInt]) -> MathResult<Option<Vec<BigInt>>> {
        if target.len() != self.cols {
            return Err(MathError::DimensionMismatch {
                expected: self.cols,
                found: target.len(),
            });
        }
        let (h, u) = self.hnf_with_transform();
        let mut rest: Vec<BigInt> = target.to_vec();
        let mut t = vec![BigInt::zero(); self.rows];

        for r in 0..h.rows {
            let Some(col) = h.row(r).iter().position(|x| !x.is_zero()) else {
                break;
            };
            let (q, rem) = rest[col].div_rem(h.get(r, col));
            if !rem.is_zero() {
                return Ok(None);
            }
            for (c, x) in rest.iter_mut().enumerate() {
                *x -= &q * h.get(r, c);
            }
            t[r] = q;
        }
        if rest.iter().any(|x| !x.is_zero()) {
            return Ok(None);
        }

        let mut s = vec![BigInt::zero(); self.rows];
        for (r, tr) in t.iter().enumerate() {
            if tr.is_zero() {
                continue;
            }
            for (c, x) in s.iter_mut().enumerate() {
                *x += tr * u.get(r, c);
            }
        }
        Ok(Some(s))
    }

    /// Returns true if `v` lies in the row lattice.
    pub fn contains(&self, v: &[BigInt]) -> MathResult<bool> {
        Ok(self.solve_left(v)?.is_some())
    }

    /// Integral pseudo-inverse of a nonsingular square matrix.
    ///
    /// Returns `(I, d)` with `self · I = d · Id` and `d > 0` minimal.
    pub fn pseudo_inverse(&self) -> MathResult<(IntMatrix, BigInt)> {
        if self.rows != self.cols {
            return Err(MathError::DimensionMismatch {
                expected: self.rows,
                found: self.cols,
            });
        }
        let n = self.rows;
        let mut a: Vec<Vec<BigRational>> = self
            .rows()
            .map(|r| r.iter().cloned().map(BigRational::from_integer).collect())
            .collect();
        let mut inv: Vec<Vec<BigRational>> = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| {
                        if r == c {
                            BigRational::one()
                        } else {
                            BigRational::zero()
                        }
                    })
                    .collect()
            })
            .collect();

        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| !a[r][col].is_zero())
                .ok_or(MathError::SingularMatrix)?;
            a.swap(col, pivot);
            inv.swap(col, pivot);
            let p = a[col][col].recip();
            for x in a[col].iter_mut().chain(inv[col].iter_mut()) {
                *x *= &p;
            }
            for r in 0..n {
                if r == col || a[r][col].is_zero() {
                    continue;
                }
                let f = a[r][col].clone();
                for c in 0..n {
                    let da = &f * &a[col][c];
                    a[r][c] -= da;
                    let di = &f * &inv[col][c];
                    inv[r][c] -= di;
                }
            }
        }

        let d = inv
            .iter()
            .flatten()
            .fold(BigInt::one(), |acc, x| acc.lcm(x.denom()));
        let rows = inv
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|x| (x * BigRational::from_integer(d.clone())).to_integer())
                    .collect()
            })
            .collect();
        Ok((Self::from_big_rows(rows, n)?, d))
    }
}

/// Extended Euclid: `(g, x, y)` with `a·x + b·y = g ≥ 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut r0, mut r1) = (a.clone(), b.clone());
    let (mut x0, mut x1) = (BigInt::one(), BigInt::zero());
    let (mut y0, mut y1) = (BigInt::zero(), BigInt::one());
    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        r0 = std::mem::replace(&mut r1, r2);
        let x2 = &x0 - &q * &x1;
        x0 = std::mem::replace(&mut x1, x2);
        let y2 = &y0 - &q * &y1;
        y0 = std::mem::replace(&mut y1, y2);
    }
    if r0.is_negative() {
        (-r0, -x0, -y0)
    } else {
        (r0, x0, y0)
    }
}

impl fmt::Debug for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.cols)?;
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
