//! Binoid Core - Binomial Ideal Decomposition
//!
//! This crate decomposes ideals generated by binomials `x^a − c·x^b` over the
//! cyclotomic closure of ℚ:
//! - Classification of binomial and unital ideals
//! - Cellular decomposition, recursive or with an explicit worklist
//! - Partial characters on integer lattices and their saturations
//! - The correspondence between characters and binomial ideals
//! - Hulls, associated primes and primary decomposition
//! - Pluggable lattice-basis oracles (in process, or the 4ti2 programs)
//!
//! # Examples
//!
//! ```
//! use binoid_core::{BinomialEngine, Cellularity};
//! use binoid_math::{Ideal, Ring};
//!
//! let ring = Ring::new(3);
//! let i = Ideal::parse(ring, &["x0 - x1", "x0^3 - 1", "x2*x1^2 - x2"]).unwrap();
//!
//! let mut engine = BinomialEngine::new();
//! assert_eq!(engine.is_cellular(&i).unwrap(), Cellularity::NotCellular(2));
//!
//! let parts = engine.cellular_decomposition(&i).unwrap();
//! assert_eq!(parts.len(), 2);
//! assert!(parts.contains(&Ideal::parse(ring, &["x0 - 1", "x1 - 1"]).unwrap()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bridge;
pub mod cellular;
pub mod character;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod hull;
pub mod oracle;
pub mod primary;
pub mod redundancy;

pub use bridge::{ideal_from_character, lattice_binomial, partial_character_from_ideal};
pub use cellular::{
    cellular_decomposition, cellular_decomposition_worklist, is_cellular, Cellularity,
};
pub use character::{PartialCharacter, Saturations};
pub use classify::{is_binomial, is_unital};
pub use config::{CellularStrategy, DecompositionConfig, OracleConfig, OracleKind};
pub use engine::{BinomialEngine, EngineStats};
pub use error::{BinomialError, Result};
pub use oracle::{FourTiTwoOracle, LatticeBasisOracle, SaturationOracle};
pub use primary::PrimaryComponent;
pub use redundancy::{minimal_ideals, stream_irredundant, RunningIntersection};
