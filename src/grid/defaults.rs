//! Built-in grid table and house edge.
//!
//! These are the values the game ships with. A config file can replace
//! them (see `persistence`), but nothing mutates them at runtime.

/// Long-run fraction of fair odds paid out (94% return to player).
pub const DEFAULT_HOUSE_EDGE: f64 = 0.94;

/// Grid identifier selected when the caller names none.
pub const DEFAULT_GRID: &str = "3x3";

/// (identifier, rows, cols, stop points)
pub const BUILTIN_GRIDS: [(&str, u32, u32, u32); 2] = [("3x3", 3, 3, 1), ("4x4", 4, 4, 2)];

/// Smallest supported side length.
pub const MIN_GRID_SIDE: u32 = 2;
