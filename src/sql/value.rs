//! The one value type shared by decoded rows and bound parameters.

use serde::Serialize;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::mysql::{MySql, MySqlTypeInfo};
use sqlx::{Database, Type};

/// A nullable scalar: decoded from a result cell or bound into a statement.
/// Serializes as plain JSON (`null`, number, or string).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Scalar JSON values only; booleans, arrays and objects have no column kind.
    pub fn from_json(v: &Value) -> Option<Self> {
        Some(match v {
            Value::Null => SqlValue::Null,
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Integer(i),
                None => SqlValue::Float(n.as_f64()?),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// One validated client field, ready for binding.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldAssignment {
    pub column: String,
    pub value: SqlValue,
}

impl FieldAssignment {
    pub fn new(column: impl Into<String>, value: SqlValue) -> Self {
        FieldAssignment {
            column: column.into(),
            value,
        }
    }
}

impl<'q> Encode<'q, MySql> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <MySql as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlValue::Null => <Option<i64> as Encode<MySql>>::encode_by_ref(&None, buf)?,
            SqlValue::Integer(n) => <i64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            SqlValue::Float(n) => <f64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            SqlValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<MySql>>::encode_by_ref(&s_ref, buf)?
            }
        })
    }

    fn produces(&self) -> Option<MySqlTypeInfo> {
        Some(match self {
            SqlValue::Integer(_) => <i64 as Type<MySql>>::type_info(),
            SqlValue::Float(_) => <f64 as Type<MySql>>::type_info(),
            SqlValue::Null | SqlValue::Text(_) => <str as Type<MySql>>::type_info(),
        })
    }
}

impl Type<MySql> for SqlValue {
    fn type_info() -> MySqlTypeInfo {
        <str as Type<MySql>>::type_info()
    }
}
