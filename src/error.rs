use thiserror::Error;

/// Result type for propagation operations.
pub type Result<T> = std::result::Result<T, OrbitError>;

/// Errors raised while parsing element records or propagating positions.
///
/// Every error is local to one satellite: callers can skip it and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    /// A fixed-column record field is missing or not a finite decimal number.
    #[error("line {line}: field `{field}` is not a valid number: {value:?}")]
    Parse {
        line: u8,
        field: &'static str,
        value: String,
    },

    /// A numeric parameter makes the position undefined.
    #[error("invalid {parameter} = {value}: {reason}")]
    Domain {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl OrbitError {
    pub(crate) fn parse(line: u8, field: &'static str, value: impl Into<String>) -> Self {
        OrbitError::Parse { line, field, value: value.into() }
    }

    pub(crate) fn domain(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        OrbitError::Domain { parameter, value, reason }
    }
}
