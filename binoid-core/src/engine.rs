//! The decomposition engine.
//!
//! [`BinomialEngine`] owns the configuration, the lattice-basis oracle and the
//! running statistics. Operations that never touch the oracle are also
//! available as free functions in their modules.

use crate::bridge;
use crate::cellular::{self, Cellularity};
use crate::character::{PartialCharacter, Saturations};
use crate::classify;
use crate::config::{CellularStrategy, DecompositionConfig};
use crate::error::Result;
use crate::hull;
use crate::oracle::{oracle_from_config, LatticeBasisOracle};
use binoid_math::{Ideal, IntMatrix, Monomial, Ring};
use tracing::debug;

/// Counters for a [`BinomialEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Cellular components produced by decompositions.
    pub cellular_components: u64,
    /// Partial characters saturated.
    pub saturations: u64,
    /// Root combinations rejected while saturating.
    pub rejected_saturations: u64,
    /// Associated primes found.
    pub associated_primes: u64,
    /// Primary components produced.
    pub primary_components: u64,
}

/// Binomial ideal decomposition engine.
pub struct BinomialEngine {
    pub(crate) config: DecompositionConfig,
    pub(crate) oracle: Box<dyn LatticeBasisOracle>,
    pub(crate) stats: EngineStats,
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BinomialEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinomialEngine")
            .field("config", &self.config)
            .field("oracle", &self.oracle.name())
            .field("stats", &self.stats)
            .finish()
    }
}

impl BinomialEngine {
    /// Create with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DecompositionConfig::default())
    }

    /// Create with a configuration; the oracle follows `config.oracle`.
    pub fn with_config(config: DecompositionConfig) -> Self {
        let oracle = oracle_from_config(&config);
        Self {
            config,
            oracle,
            stats: EngineStats::default(),
        }
    }

    /// Replace the lattice-basis oracle.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Box<dyn LatticeBasisOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    /// The configuration.
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// The lattice-basis oracle in use.
    pub fn oracle(&self) -> &dyn LatticeBasisOracle {
        self.oracle.as_ref()
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Reset the statistics.
    pub fn reset_stats(&mut self) {
        self.stats = EngineStats::default();
    }

    /// Whether the ideal is binomial.
    pub fn is_binomial(&self, ideal: &Ideal) -> Result<bool> {
        classify::is_binomial(ideal)
    }

    /// Whether the ideal is unital.
    pub fn is_unital(&self, ideal: &Ideal) -> Result<bool> {
        classify::is_unital(ideal)
    }

    /// Cellularity test.
    pub fn is_cellular(&self, ideal: &Ideal) -> Result<Cellularity> {
        cellular::is_cellular(ideal)
    }

    /// Cellular decomposition with the configured strategy.
    pub fn cellular_decomposition(&mut self, ideal: &Ideal) -> Result<Vec<Ideal>> {
        let parts = match self.config.strategy {
            CellularStrategy::Recursive => cellular::cellular_decomposition(ideal)?,
            CellularStrategy::Worklist => cellular::cellular_decomposition_worklist(ideal)?,
        };
        self.stats.cellular_components += parts.len() as u64;
        debug!(
            strategy = ?self.config.strategy,
            components = parts.len(),
            "cellular decomposition"
        );
        Ok(parts)
    }

    /// All saturations of a character, bounded by the configured limit.
    pub fn saturations(&mut self, character: &PartialCharacter) -> Result<Vec<PartialCharacter>> {
        let Saturations {
            characters,
            rejected,
        } = character.saturations_with_limit(self.config.max_saturation_candidates)?;
        self.stats.saturations += 1;
        self.stats.rejected_saturations += rejected as u64;
        Ok(characters)
    }

    /// The binomial ideal of a character, using the engine's oracle.
    pub fn ideal_from_character(&self, character: &PartialCharacter, ring: Ring) -> Result<Ideal> {
        bridge::ideal_from_character(character, ring, self.oracle.as_ref())
    }

    /// The partial character of a cellular binomial ideal.
    pub fn partial_character_from_ideal(&self, ideal: &Ideal) -> Result<PartialCharacter> {
        bridge::partial_character_from_ideal(ideal)
    }

    /// The lattice of a unital cellular binomial ideal.
    pub fn unital_lattice(&self, ideal: &Ideal) -> Result<IntMatrix> {
        bridge::unital_lattice(ideal)
    }

    /// Standard monomials in the non-cell variables.
    pub fn cellular_standard_monomials(&self, ideal: &Ideal) -> Result<Vec<Monomial>> {
        hull::cellular_standard_monomials(ideal)
    }

    /// Witness monomials of a cellular ideal.
    pub fn witness_monomials(&self, ideal: &Ideal) -> Result<Vec<Monomial>> {
        hull::witness_monomials(ideal)
    }

    /// Hull of a cellular ideal.
    pub fn cellular_hull(&self, ideal: &Ideal) -> Result<Ideal> {
        hull::cellular_hull(ideal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;
    use crate::oracle::FourTiTwoOracle;

    fn ideal(n: usize, gens: &[&str]) -> Ideal {
        Ideal::parse(Ring::new(n), gens).unwrap()
    }

    #[test]
    fn test_strategy_selection() {
        let i = ideal(2, &["x0*x1 - x1"]);
        let mut worklist = BinomialEngine::new();
        let mut recursive = BinomialEngine::with_config(
            DecompositionConfig::default().with_strategy(CellularStrategy::Recursive),
        );
        let a = worklist.cellular_decomposition(&i).unwrap();
        let b = recursive.cellular_decomposition(&i).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(worklist.stats().cellular_components, 2);
    }

    #[test]
    fn test_saturation_stats() {
        let mut engine = BinomialEngine::new();
        let i = ideal(2, &["x0^3 - x1^3"]);
        let p = engine.partial_character_from_ideal(&i).unwrap();
        assert_eq!(engine.saturations(&p).unwrap().len(), 3);
        assert_eq!(engine.stats().saturations, 1);
        engine.reset_stats();
        assert_eq!(engine.stats(), &EngineStats::default());
    }

    #[test]
    fn test_saturation_limit_from_config() {
        let mut engine = BinomialEngine::with_config(
            DecompositionConfig::default().with_max_saturation_candidates(2),
        );
        let p = engine
            .partial_character_from_ideal(&ideal(2, &["x0^3 - x1^3"]))
            .unwrap();
        assert!(matches!(
            engine.saturations(&p),
            Err(crate::BinomialError::SaturationLimit { candidates: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_oracle_injection() {
        let engine = BinomialEngine::new()
            .with_oracle(Box::new(FourTiTwoOracle::new(OracleConfig::default())));
        assert_eq!(engine.oracle().name(), "4ti2");
        assert_eq!(BinomialEngine::new().oracle().name(), "native");
    }
}
