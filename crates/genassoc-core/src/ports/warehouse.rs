//! Analytical warehouse port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A bound query parameter.
///
/// Parameters are referenced from query text as `{name:Type}` placeholders
/// and travel separately from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    String(String),
    UInt64(u64),
    StringArray(Vec<String>),
}

impl QueryParam {
    /// Warehouse type name used inside the placeholder.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::UInt64(_) => "UInt64",
            Self::StringArray(_) => "Array(String)",
        }
    }
}

/// Parameterized query text plus its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    sql: String,
    params: Vec<(String, QueryParam)>,
}

impl Query {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind a parameter by name.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: QueryParam) -> Self {
        self.params.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[(String, QueryParam)] {
        &self.params
    }

    /// Look up a bound parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&QueryParam> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// A positional cell could not be decoded into the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot decode {location} as {expected}")]
pub struct DecodeError {
    pub location: String,
    pub expected: &'static str,
}

impl DecodeError {
    #[must_use]
    pub fn new(location: impl Into<String>, expected: &'static str) -> Self {
        Self {
            location: location.into(),
            expected,
        }
    }

    fn column(index: usize, expected: &'static str) -> Self {
        Self::new(format!("column {index}"), expected)
    }
}

/// One result row; cells are addressed by position.
///
/// Accessors are nullable-aware: the `opt_*` forms map SQL `NULL` and
/// missing trailing cells to `None`, the plain forms fail on them. Numbers
/// are accepted either as JSON numbers or as numeric strings, since 64-bit
/// integers are often quoted on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(cells: Vec<Value>) -> Self {
        Self(cells)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn cell(&self, index: usize) -> Option<&Value> {
        self.0.get(index).filter(|value| !value.is_null())
    }

    pub fn string(&self, index: usize) -> Result<String, DecodeError> {
        self.opt_string(index)?
            .ok_or_else(|| DecodeError::column(index, "String"))
    }

    pub fn opt_string(&self, index: usize) -> Result<Option<String>, DecodeError> {
        match self.cell(index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(DecodeError::column(index, "String")),
        }
    }

    /// Like [`Row::opt_string`] but treats `""` as absent, which is how key
    /// lookups report a missing attribute.
    pub fn non_empty_string(&self, index: usize) -> Result<Option<String>, DecodeError> {
        Ok(self.opt_string(index)?.filter(|s| !s.is_empty()))
    }

    pub fn u64(&self, index: usize) -> Result<u64, DecodeError> {
        self.opt_u64(index)?
            .ok_or_else(|| DecodeError::column(index, "UInt64"))
    }

    pub fn opt_u64(&self, index: usize) -> Result<Option<u64>, DecodeError> {
        match self.cell(index) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| DecodeError::column(index, "UInt64")),
            Some(Value::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| DecodeError::column(index, "UInt64")),
            Some(_) => Err(DecodeError::column(index, "UInt64")),
        }
    }

    pub fn f64(&self, index: usize) -> Result<f64, DecodeError> {
        self.opt_f64(index)?
            .ok_or_else(|| DecodeError::column(index, "Float64"))
    }

    pub fn opt_f64(&self, index: usize) -> Result<Option<f64>, DecodeError> {
        match self.cell(index) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| DecodeError::column(index, "Float64")),
            Some(Value::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| DecodeError::column(index, "Float64")),
            Some(_) => Err(DecodeError::column(index, "Float64")),
        }
    }

    /// Booleans arrive as `true`/`false` or as `0`/`1` integers.
    pub fn opt_bool(&self, index: usize) -> Result<Option<bool>, DecodeError> {
        match self.cell(index) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Number(n)) => match n.as_u64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(DecodeError::column(index, "Bool")),
            },
            Some(_) => Err(DecodeError::column(index, "Bool")),
        }
    }

    /// Array cells; `NULL` decodes as an empty array.
    pub fn string_array(&self, index: usize) -> Result<Vec<String>, DecodeError> {
        self.array(index, "Array(String)", |value| {
            value.as_str().map(str::to_string)
        })
    }

    pub fn f64_array(&self, index: usize) -> Result<Vec<f64>, DecodeError> {
        self.array(index, "Array(Float64)", |value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
    }

    /// Integer arrays, also accepted in their JSON text form (`"[1,2,3]"`).
    pub fn u64_array(&self, index: usize) -> Result<Vec<u64>, DecodeError> {
        if let Some(Value::String(text)) = self.cell(index) {
            if text.is_empty() {
                return Ok(Vec::new());
            }
            return serde_json::from_str(text)
                .map_err(|_| DecodeError::column(index, "Array(UInt64)"));
        }
        self.array(index, "Array(UInt64)", |value| match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
    }

    fn array<T>(
        &self,
        index: usize,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Vec<T>, DecodeError> {
        match self.cell(index) {
            None => Ok(Vec::new()),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| convert(value).ok_or_else(|| DecodeError::column(index, expected)))
                .collect(),
            Some(_) => Err(DecodeError::column(index, expected)),
        }
    }
}

/// Errors from warehouse port operations.
///
/// Driver and transport details are mapped to these by the adapter.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Warehouse unreachable: {message}")]
    Network { message: String },

    #[error("Warehouse request timed out")]
    Timeout,

    #[error("Warehouse rejected query (status {status}): {message}")]
    Query { status: u16, message: String },

    #[error("Invalid warehouse response: {message}")]
    InvalidResponse { message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Port for running read-only analytical queries.
///
/// Implementations return rows in the order the warehouse produced them.
#[async_trait]
pub trait WarehousePort: Send + Sync {
    async fn query(&self, query: &Query) -> WarehouseResult<Vec<Row>>;
}
