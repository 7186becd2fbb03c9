//! HTTP handlers for the table explorer.

pub mod table;
pub use table::*;
