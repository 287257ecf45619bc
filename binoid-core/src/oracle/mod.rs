//! Lattice-Basis Oracles.
//!
//! An oracle turns a lattice `L ⊆ ℤⁿ` (rows of a matrix) into the exponent
//! vectors of a generating set of the lattice ideal
//! `I_L = ⟨x^{u+} − x^{u−} : u ∈ L⟩`. Two implementations exist:
//! - [`SaturationOracle`]: in process, by saturating the basis binomials
//! - [`FourTiTwoOracle`]: the 4ti2 `markov` and `groebner` programs

mod fourtitwo;
mod native;

pub use fourtitwo::{format_matrix, parse_matrix, FourTiTwoOracle};
pub use native::SaturationOracle;

use crate::config::{DecompositionConfig, OracleKind};
use crate::error::Result;
use binoid_math::IntMatrix;

/// Source of Markov and lattice Gröbner bases.
pub trait LatticeBasisOracle {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Rows `u` such that the binomials `x^{u+} − x^{u−}` generate the lattice ideal.
    fn markov_basis(&self, lattice: &IntMatrix) -> Result<IntMatrix>;

    /// Rows `u` whose binomials form a Gröbner basis of the lattice ideal for
    /// the term order refined by `cost`; `x^{u+}` is the leading term.
    fn lattice_groebner_basis(&self, lattice: &IntMatrix, cost: &[i64]) -> Result<IntMatrix>;
}

/// Build the oracle selected in `config`.
pub fn oracle_from_config(config: &DecompositionConfig) -> Box<dyn LatticeBasisOracle> {
    match config.oracle {
        OracleKind::Native => Box::new(SaturationOracle::with_config(config.buchberger.clone())),
        OracleKind::FourTiTwo => Box::new(FourTiTwoOracle::new(config.oracle_config.clone())),
    }
}
