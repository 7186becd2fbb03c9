//! Safe SQL builder: identifiers from the discovered schema only, values as parameters.

mod builder;
pub mod value;
pub use builder::*;
pub use value::*;
