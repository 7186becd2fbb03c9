//! In-memory schema model discovered from the live database.

pub mod types;
pub mod mapper;
pub mod loader;

pub use types::*;
pub use mapper::*;
pub use loader::*;
