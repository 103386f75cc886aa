//! Error types for the calculator engine.

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that stop the command-line driver.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the key script
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to render the screen snapshot
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recoverable arithmetic failures.
///
/// These never abort processing; the engine reports them as
/// [`Effect::ErrorRaised`](crate::Effect::ErrorRaised) and the display text
/// is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Binary division with a zero divisor
    #[error("Cannot divide by zero")]
    DivideByZero,

    /// Square root of a negative number
    #[error("Invalid input for square root")]
    NegativeSquareRoot,

    /// Base-10 logarithm of zero or a negative number
    #[error("Invalid input for logarithm")]
    Logarithm,

    /// Natural logarithm of zero or a negative number
    #[error("Invalid input for natural log")]
    NaturalLogarithm,

    /// `1/x` with `x == 0`
    #[error("Cannot divide by zero")]
    ReciprocalOfZero,

    /// Factorial of a negative or fractional number
    #[error("Invalid input for factorial")]
    Factorial,

    /// The result is not a finite number, or does not fit the memory register
    #[error("Result is out of range")]
    OutOfRange,
}
