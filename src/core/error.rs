use thiserror::Error;

/// Failures surfaced by lattice construction and energy evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Lattice dimensions must be exactly `(nx, ny)` with both positive.
    #[error("invalid lattice dimensions: {0}")]
    InvalidDimensions(String),

    /// Initial spin value must be a finite, non-zero real 3-vector.
    #[error("invalid spin value: {0}")]
    InvalidValue(String),

    /// A coupling constant is outside its physical domain.
    #[error("{term} energy requires {constant} >= 0, got {value}")]
    Domain {
        term: &'static str,
        constant: &'static str,
        value: f64,
    },

    /// The anisotropy axis cannot be normalized.
    #[error("anisotropy axis must have non-zero length")]
    DegenerateAxis,

    /// Metropolis temperature must be finite and non-negative.
    #[error("temperature must be finite and >= 0, got {0}")]
    InvalidTemperature(f64),
}

pub type SimResult<T> = Result<T, SimError>;
