//! Error types for grid configuration and simulation parameters.

use std::io;
use std::path::PathBuf;

/// Problems with the process-wide grid/house-edge configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown grid size '{0}'")]
    UnknownGrid(String),
    #[error("invalid grid {rows}x{cols} with {stop_points} stop points: {reason}")]
    InvalidGrid {
        rows: u32,
        cols: u32,
        stop_points: u32,
        reason: &'static str,
    },
    #[error("house edge must be in (0, 1], got {0}")]
    InvalidHouseEdge(f64),
    #[error("config io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Simulation parameters rejected before any round is played.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidParameterError {
    #[error("rounds must be at least 1")]
    ZeroRounds,
    #[error("bet must be a positive finite amount, got {0}")]
    Bet(f64),
    #[error("starting balance must be a positive finite amount, got {0}")]
    StartBalance(f64),
    #[error("shard count must be at least 1")]
    ZeroShards,
}

/// Anything a simulation entry point keyed by grid identifier can fail with.
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_grid_message_names_grid() {
        let err = ConfigurationError::UnknownGrid("7x7".to_string());
        assert_eq!(err.to_string(), "unknown grid size '7x7'");
    }

    #[test]
    fn test_simulation_error_wraps_both_kinds() {
        let err: SimulationError = InvalidParameterError::ZeroRounds.into();
        assert!(matches!(err, SimulationError::InvalidParameter(_)));
        assert_eq!(err.to_string(), "rounds must be at least 1");

        let err: SimulationError = ConfigurationError::InvalidHouseEdge(1.5).into();
        assert!(matches!(err, SimulationError::Configuration(_)));
    }
}
