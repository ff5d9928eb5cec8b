use super::logic::{max_step_for_grid, multiplier_for_step, step_probability, survival_probability};
use crate::grid::{GridConfiguration, HouseEdge};
use serde::Serialize;

/// One row of the odds readout for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepOdds {
    pub step: u32,
    /// Chance of this step alone succeeding.
    pub probability: f64,
    /// Chance of reaching this step from the start of the round.
    pub survival: f64,
    pub multiplier: f64,
}

/// Odds for every practical step, in order.
pub fn odds_table(cfg: &GridConfiguration, edge: HouseEdge) -> Vec<StepOdds> {
    (1..=max_step_for_grid(cfg))
        .map(|step| StepOdds {
            step,
            probability: step_probability(step, cfg),
            survival: survival_probability(step, cfg),
            multiplier: multiplier_for_step(step, cfg, edge),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_practical_steps() {
        let cfg = GridConfiguration::new(4, 4, 2).unwrap();
        let table = odds_table(&cfg, HouseEdge::default());
        assert_eq!(table.len(), 13);
        assert_eq!(table.first().map(|r| r.step), Some(1));
        assert_eq!(table.last().map(|r| r.step), Some(13));
    }

    #[test]
    fn test_table_multipliers_rise_survival_falls() {
        let cfg = GridConfiguration::new(3, 3, 1).unwrap();
        let table = odds_table(&cfg, HouseEdge::default());
        for pair in table.windows(2) {
            assert!(pair[1].multiplier > pair[0].multiplier);
            assert!(pair[1].survival < pair[0].survival);
        }
    }
}
