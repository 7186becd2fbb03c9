//! Maps driver-reported column types to coercion kinds.

use crate::schema::CoercionKind;

/// Classify a raw column type string such as `int(11)` or `varchar(255)`.
///
/// Case-sensitive prefix match; anything unrecognized is kept as text.
pub fn classify(raw_type: &str) -> CoercionKind {
    if raw_type.starts_with("int") {
        CoercionKind::Integer
    } else if ["float", "double", "decimal"].iter().any(|p| raw_type.starts_with(p)) {
        CoercionKind::Float
    } else {
        CoercionKind::Text
    }
}
