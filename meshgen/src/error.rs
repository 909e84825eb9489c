//! Generation errors

use thiserror::Error;

/// Reasons a generator produced no mesh
///
/// Generation is all-or-nothing: an error always means no geometry at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("{shape}: {name} must be >= 0.0 (got {value})")]
    NegativeParameter {
        shape: &'static str,
        name: &'static str,
        value: f64,
    },

    #[error("disc: inner radius {inner_radius} must be in (0, {radius})")]
    InvalidInnerRadius { radius: f64, inner_radius: f64 },

    #[error("{shape}: division number {division_number} is below the minimum of {minimum}")]
    TooFewDivisions {
        shape: &'static str,
        division_number: usize,
        minimum: usize,
    },

    #[error("{what}: need at least {minimum} points, got {count}")]
    InsufficientPoints {
        what: &'static str,
        count: usize,
        minimum: usize,
    },

    #[error("elevation grid: expected {expected} height samples, got {actual}")]
    HeightCountMismatch { expected: usize, actual: usize },

    #[error("{shape}: parameter {name} must be finite (got {value})")]
    NonFiniteParameter {
        shape: &'static str,
        name: &'static str,
        value: f64,
    },

    #[error("{shape}: {stations} x {steps} vertices exceed the u32 index range")]
    TooManyVertices {
        shape: &'static str,
        stations: usize,
        steps: usize,
    },
}

/// Result type for generation calls
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
