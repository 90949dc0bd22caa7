//! Error types for grid construction, expression evaluation and
//! differentiation.
//!
//! Every error aborts the whole computation: no partially filled series is
//! ever handed to a caller.

use thiserror::Error;

/// An expression could not be evaluated over the sample grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// The expression text is malformed or has unparsed trailing input.
    #[error("invalid syntax at '{remainder}'")]
    Syntax { remainder: String },

    /// Parentheses, signs or powers nest deeper than the parser supports.
    #[error("expression nests {depth} levels deep, at most {max} are supported")]
    TooDeep { depth: usize, max: usize },

    /// The expression text is longer than the parser supports.
    #[error("expression is {length} characters long, at most {max} are supported")]
    TooLong { length: usize, max: usize },

    /// An identifier that is neither the grid variable nor a known constant.
    #[error("name '{0}' is not defined")]
    UndefinedName(String),

    /// A call to a function outside the supported set.
    #[error("function '{0}' is not supported")]
    UnknownFunction(String),

    /// A supported function called with the wrong number of arguments.
    #[error("function '{name}' takes {expected} argument(s) but {found} were given")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// The expression produced NaN or an infinity (a domain error).
    #[error("result is not a finite number at x = {x} (got {value})")]
    NonFinite { x: f64, value: f64 },
}

/// Fewer than two samples: the derivative is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("at least 2 samples are required to differentiate, got {found}")]
pub struct InsufficientSamplesError {
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DifferentiationError {
    #[error(transparent)]
    InsufficientSamples(#[from] InsufficientSamplesError),

    #[error("values and grid differ in length ({values} vs {grid})")]
    LengthMismatch { values: usize, grid: usize },

    /// A difference quotient overflowed.
    #[error("derivative is not a finite number at x = {x} (got {value})")]
    NonFinite { x: f64, value: f64 },
}

/// The requested sample grid violates its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid bounds must be finite, got [{x_min}, {x_max}]")]
    NonFiniteBounds { x_min: f64, x_max: f64 },

    #[error("x_min must be less than x_max, got [{x_min}, {x_max}]")]
    EmptyDomain { x_min: f64, x_max: f64 },

    #[error(transparent)]
    InsufficientSamples(#[from] InsufficientSamplesError),

    #[error("at most {max} samples are supported, got {found}")]
    TooManySamples { found: usize, max: usize },

    #[error("invalid grid points: {}", .0.join("; "))]
    InvalidPoints(Vec<String>),

    /// The bounds are valid but floating point cannot place that many
    /// distinct, finite points between them.
    #[error("degenerate grid: {}", .0.join("; "))]
    Degenerate(Vec<String>),
}

/// Any failure of the sample → differentiate → differentiate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    #[error("invalid sample grid: {0}")]
    Grid(GridError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    InsufficientSamples(InsufficientSamplesError),

    #[error("differentiation failed: {0}")]
    Differentiation(DifferentiationError),
}

impl From<GridError> for ComputeError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::InsufficientSamples(inner) => ComputeError::InsufficientSamples(inner),
            other => ComputeError::Grid(other),
        }
    }
}

impl From<DifferentiationError> for ComputeError {
    fn from(error: DifferentiationError) -> Self {
        match error {
            DifferentiationError::InsufficientSamples(inner) => {
                ComputeError::InsufficientSamples(inner)
            }
            other => ComputeError::Differentiation(other),
        }
    }
}

impl From<InsufficientSamplesError> for ComputeError {
    fn from(error: InsufficientSamplesError) -> Self {
        ComputeError::InsufficientSamples(error)
    }
}
