//! Read-only odds surface keyed by grid identifier.
//!
//! This is what a game front end holds: the registry and house edge loaded
//! once at startup, answering odds questions by grid name. It never keeps
//! per-round state; the caller owns the path and balance.

use crate::error::{ConfigurationError, SimulationError};
use crate::grid::{load_registry, load_registry_from, GridConfiguration, GridRegistry, HouseEdge};
use crate::odds::{self, RandomSource, StepOdds};
use crate::simulator::{run_simulation, SimParams, SimulationSummary};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct OddsBook {
    registry: GridRegistry,
}

impl OddsBook {
    pub fn new(registry: GridRegistry) -> Self {
        Self { registry }
    }

    pub fn builtin() -> Self {
        Self::new(GridRegistry::builtin())
    }

    /// Registry from `~/.stepwager/grids.json`, or the built-in grids when
    /// that file does not exist.
    pub fn load() -> Result<Self, ConfigurationError> {
        load_registry().map(Self::new)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        load_registry_from(path).map(Self::new)
    }

    pub fn registry(&self) -> &GridRegistry {
        &self.registry
    }

    pub fn house_edge(&self) -> HouseEdge {
        self.registry.house_edge
    }

    pub fn grid(&self, id: &str) -> Result<&GridConfiguration, ConfigurationError> {
        self.registry.get(id)
    }

    pub fn step_probability(&self, grid: &str, step: u32) -> Result<f64, ConfigurationError> {
        Ok(odds::step_probability(step, self.grid(grid)?))
    }

    pub fn multiplier_for_step(&self, grid: &str, step: u32) -> Result<f64, ConfigurationError> {
        Ok(odds::multiplier_for_step(step, self.grid(grid)?, self.house_edge()))
    }

    pub fn roll_step_success<R: RandomSource + ?Sized>(
        &self,
        grid: &str,
        step: u32,
        rng: &mut R,
    ) -> Result<bool, ConfigurationError> {
        Ok(odds::roll_step_success(step, self.grid(grid)?, rng))
    }

    pub fn max_step(&self, grid: &str) -> Result<u32, ConfigurationError> {
        Ok(odds::max_step_for_grid(self.grid(grid)?))
    }

    pub fn odds_table(&self, grid: &str) -> Result<Vec<StepOdds>, ConfigurationError> {
        Ok(odds::odds_table(self.grid(grid)?, self.house_edge()))
    }

    /// Run the interchange parameter record against this book's grids.
    pub fn simulate<R: RandomSource + ?Sized>(
        &self,
        params: &SimParams,
        rng: &mut R,
    ) -> Result<SimulationSummary, SimulationError> {
        let cfg = self.grid(&params.grid)?;
        Ok(run_simulation(&params.run, cfg, self.house_edge(), rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::RunParams;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_lookup_by_identifier() {
        let book = OddsBook::builtin();
        assert!((book.step_probability("3x3", 1).unwrap() - 8.0 / 9.0).abs() < 1e-12);
        assert!((book.multiplier_for_step("3x3", 1).unwrap() - 1.0575).abs() < 1e-12);
        assert_eq!(book.max_step("4x4").unwrap(), 13);
        assert_eq!(book.odds_table("3x3").unwrap().len(), 7);
    }

    #[test]
    fn test_unknown_identifier_never_defaults() {
        let book = OddsBook::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            book.step_probability("10x10", 1),
            Err(ConfigurationError::UnknownGrid(_))
        ));
        assert!(book.multiplier_for_step("", 1).is_err());
        assert!(book.roll_step_success("2x9", 1, &mut rng).is_err());
        assert!(book.max_step("3X3").is_err());
    }

    #[test]
    fn test_simulate_reports_param_errors() {
        let book = OddsBook::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = SimParams {
            grid: "3x3".to_string(),
            run: RunParams {
                bet: -2.0,
                ..Default::default()
            },
        };
        let err = book.simulate(&params, &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter(_)));

        let params = SimParams {
            grid: "nope".to_string(),
            ..Default::default()
        };
        let err = book.simulate(&params, &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::Configuration(_)));
    }
}
