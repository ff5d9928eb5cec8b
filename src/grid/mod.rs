//! Grid geometry, house edge and the registry that names them.

pub mod defaults;
pub mod persistence;
pub mod registry;
pub mod types;

pub use defaults::*;
pub use persistence::*;
pub use registry::GridRegistry;
pub use types::*;
