//! Binoid Math - Exact Algebra for Binomial Ideals
//!
//! This crate provides the exact algebra consumed by the decomposition engine:
//! - [`Cyclo`]: elements of cyclotomic fields, closed under the roots of unity
//!   that character saturation needs
//! - Sparse multivariate polynomials with lex, grlex, grevlex, elimination and
//!   weighted orders
//! - Buchberger's algorithm with product and chain criteria
//! - [`Ideal`]: membership, sum, quotient, saturation, elimination, intersection
//! - [`IntMatrix`]: Hermite normal form, pseudo-inverse and integral solving
//!
//! # Examples
//!
//! ```
//! use binoid_math::{Ideal, Polynomial, Ring};
//!
//! let ring = Ring::new(2);
//! let i = Ideal::parse(ring, &["x0*x1"]).unwrap();
//! let x1: Polynomial = "x1".parse().unwrap();
//!
//! // (x0*x1) : x1^∞ = (x0), reached after one step
//! let (sat, k) = i.saturation_with_index(&x1).unwrap();
//! assert_eq!(sat, Ideal::parse(ring, &["x0"]).unwrap());
//! assert_eq!(k, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cyclotomic;
pub mod error;
pub mod grobner;
pub mod ideal;
pub mod lattice;
pub mod polynomial;

pub use cyclotomic::Cyclo;
pub use error::{MathError, MathResult};
pub use grobner::{Buchberger, BuchbergerConfig, BuchbergerStats};
pub use ideal::{Ideal, Ring};
pub use lattice::IntMatrix;
pub use polynomial::{Monomial, MonomialOrder, Polynomial, Term, Var};
