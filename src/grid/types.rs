use super::defaults::{DEFAULT_HOUSE_EDGE, MIN_GRID_SIDE};
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Immutable grid geometry: how many cells exist and how many of them end a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec", into = "GridSpec")]
pub struct GridConfiguration {
    rows: u32,
    cols: u32,
    stop_point_count: u32,
}

/// Raw grid description as it appears in a config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub stop_points: u32,
}

impl GridConfiguration {
    /// Validate and build a grid. Needs both sides >= 2, at least one stop
    /// point, and at least two safe cells so one step can be targeted.
    pub fn new(rows: u32, cols: u32, stop_point_count: u32) -> Result<Self, ConfigurationError> {
        let invalid = |reason| ConfigurationError::InvalidGrid {
            rows,
            cols,
            stop_points: stop_point_count,
            reason,
        };

        if rows < MIN_GRID_SIDE || cols < MIN_GRID_SIDE {
            return Err(invalid("grid must be at least 2x2"));
        }
        let total = rows
            .checked_mul(cols)
            .ok_or_else(|| invalid("grid is too large"))?;
        if stop_point_count == 0 {
            return Err(invalid("grid needs at least one stop point"));
        }
        if stop_point_count >= total {
            return Err(invalid("stop points must leave safe cells"));
        }
        if total - stop_point_count < 2 {
            return Err(invalid("grid needs at least two safe cells"));
        }

        Ok(Self {
            rows,
            cols,
            stop_point_count,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn total_cells(&self) -> u32 {
        self.rows * self.cols
    }

    pub fn stop_point_count(&self) -> u32 {
        self.stop_point_count
    }

    pub fn safe_cells(&self) -> u32 {
        self.total_cells() - self.stop_point_count
    }
}

impl TryFrom<GridSpec> for GridConfiguration {
    type Error = ConfigurationError;

    fn try_from(spec: GridSpec) -> Result<Self, Self::Error> {
        Self::new(spec.rows, spec.cols, spec.stop_points)
    }
}

impl From<GridConfiguration> for GridSpec {
    fn from(cfg: GridConfiguration) -> Self {
        Self {
            rows: cfg.rows,
            cols: cfg.cols,
            stop_points: cfg.stop_point_count,
        }
    }
}

/// Fraction of fair odds actually paid, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HouseEdge(f64);

impl HouseEdge {
    pub fn new(value: f64) -> Result<Self, ConfigurationError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigurationError::InvalidHouseEdge(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for HouseEdge {
    fn default() -> Self {
        Self(DEFAULT_HOUSE_EDGE)
    }
}

impl TryFrom<f64> for HouseEdge {
    type Error = ConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HouseEdge> for f64 {
    fn from(edge: HouseEdge) -> Self {
        edge.0
    }
}
