//! Router assembly.

mod table;
pub use table::*;
