//! TableService: generic table operations using the safe SQL builder.

mod table;
mod validation;
pub mod pagination;
pub use table::TableService;
pub use validation::RequestValidator;
