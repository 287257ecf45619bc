//! Engine configuration.
//!
//! Plain serde-friendly structs with `Default` and builder-style setters.

use binoid_math::BuchbergerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Strategy used to split a binomial ideal into cellular components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellularStrategy {
    /// Split on a witness variable and recurse on both halves
    Recursive,
    /// Explicit worklist of partially saturated ideals with early pruning
    #[default]
    Worklist,
}

/// Which lattice-basis oracle the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OracleKind {
    /// In-process computation by saturating lattice binomials
    #[default]
    Native,
    /// The 4ti2 `markov` / `groebner` programs
    FourTiTwo,
}

/// Settings for the out-of-process lattice oracle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Directory holding the 4ti2 executables; `None` searches `PATH`
    pub binary_dir: Option<PathBuf>,
}

impl OracleConfig {
    /// Use executables from `dir`
    #[must_use]
    pub fn with_binary_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.binary_dir = Some(dir.into());
        self
    }
}

/// Configuration for [`BinomialEngine`](crate::BinomialEngine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompositionConfig {
    /// Cellular decomposition strategy for `cellular_decomposition`
    pub strategy: CellularStrategy,
    /// Lattice-basis oracle
    pub oracle: OracleKind,
    /// Oracle settings
    pub oracle_config: OracleConfig,
    /// Upper bound on root combinations tried per character saturation
    pub max_saturation_candidates: usize,
    /// Pair criteria used by the native lattice oracle
    pub buchberger: BuchbergerConfig,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            strategy: CellularStrategy::default(),
            oracle: OracleKind::default(),
            oracle_config: OracleConfig::default(),
            max_saturation_candidates: 1 << 16,
            buchberger: BuchbergerConfig::default(),
        }
    }
}

impl DecompositionConfig {
    /// Select the cellular decomposition strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: CellularStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select the lattice-basis oracle
    #[must_use]
    pub fn with_oracle(mut self, oracle: OracleKind) -> Self {
        self.oracle = oracle;
        self
    }

    /// Settings for the external oracle
    #[must_use]
    pub fn with_oracle_config(mut self, config: OracleConfig) -> Self {
        self.oracle_config = config;
        self
    }

    /// Bound the number of root combinations tried per saturation
    #[must_use]
    pub fn with_max_saturation_candidates(mut self, limit: usize) -> Self {
        self.max_saturation_candidates = limit;
        self
    }
}
