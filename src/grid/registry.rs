use super::defaults::BUILTIN_GRIDS;
use super::types::{GridConfiguration, HouseEdge};
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grid-size identifier → configuration, plus the single house edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRegistry {
    pub house_edge: HouseEdge,
    pub grids: BTreeMap<String, GridConfiguration>,
}

impl Default for GridRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GridRegistry {
    /// The grids the game ships with.
    pub fn builtin() -> Self {
        let grids = BUILTIN_GRIDS
            .iter()
            .filter_map(|&(id, rows, cols, stops)| {
                GridConfiguration::new(rows, cols, stops)
                    .ok()
                    .map(|cfg| (id.to_string(), cfg))
            })
            .collect();

        Self {
            house_edge: HouseEdge::default(),
            grids,
        }
    }

    /// Look up a grid. Unknown identifiers are an error, never a fallback.
    pub fn get(&self, id: &str) -> Result<&GridConfiguration, ConfigurationError> {
        self.grids
            .get(id)
            .ok_or_else(|| ConfigurationError::UnknownGrid(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }
}
