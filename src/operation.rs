//! Binary operators and unary functions.
//!
//! Each operation knows its display symbol and its domain. Arithmetic is done
//! in `f64`; a non-finite outcome is reported as [`DomainError::OutOfRange`]
//! so that no `inf`/`NaN` ever reaches the display.

use crate::error::DomainError;
use std::f64::consts::{E, PI};
use std::fmt;

/// Largest integer whose factorial is a finite `f64`.
const MAX_FACTORIAL_INPUT: f64 = 170.0;

/// Operator waiting for its second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `xʸ`, entered from the scientific panel but resolved like any operator.
    Power,
}

impl BinaryOperator {
    /// Symbol used in history expressions and the operation indicator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "−",
            BinaryOperator::Multiply => "×",
            BinaryOperator::Divide => "÷",
            BinaryOperator::Power => "xʸ",
        }
    }

    /// Computes `lhs op rhs` without rounding.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, DomainError> {
        let value = match self {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Subtract => lhs - rhs,
            BinaryOperator::Multiply => lhs * rhs,
            BinaryOperator::Divide => {
                if rhs == 0.0 {
                    return Err(DomainError::DivideByZero);
                }
                lhs / rhs
            }
            BinaryOperator::Power => lhs.powf(rhs),
        };
        finite(value)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Function applied to the displayed value, or a constant replacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Percent,
    Negate,
    Sqrt,
    Square,
    Reciprocal,
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Exp,
    Abs,
    Factorial,
    Pi,
    E,
}

impl UnaryFunction {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryFunction::Percent => "%",
            UnaryFunction::Negate => "±",
            UnaryFunction::Sqrt => "√",
            UnaryFunction::Square => "x²",
            UnaryFunction::Reciprocal => "1/x",
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Log10 => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Exp => "eˣ",
            UnaryFunction::Abs => "|x|",
            UnaryFunction::Factorial => "x!",
            UnaryFunction::Pi => "π",
            UnaryFunction::E => "e",
        }
    }

    /// Value of a constant, `None` for functions of the displayed value.
    pub fn constant(self) -> Option<f64> {
        match self {
            UnaryFunction::Pi => Some(PI),
            UnaryFunction::E => Some(E),
            _ => None,
        }
    }

    /// Whether the function lives on the scientific panel.
    ///
    /// The panel closes after one of these succeeds.
    pub fn is_scientific(self) -> bool {
        !matches!(
            self,
            UnaryFunction::Percent
                | UnaryFunction::Negate
                | UnaryFunction::Sqrt
                | UnaryFunction::Square
                | UnaryFunction::Reciprocal
        )
    }

    /// Applies the function to `x`. Trigonometric functions take degrees.
    pub fn apply(self, x: f64) -> Result<f64, DomainError> {
        let value = match self {
            UnaryFunction::Percent => x / 100.0,
            UnaryFunction::Negate => -x,
            UnaryFunction::Sqrt => {
                if x < 0.0 {
                    return Err(DomainError::NegativeSquareRoot);
                }
                x.sqrt()
            }
            UnaryFunction::Square => x * x,
            UnaryFunction::Reciprocal => {
                if x == 0.0 {
                    return Err(DomainError::ReciprocalOfZero);
                }
                1.0 / x
            }
            UnaryFunction::Sin => x.to_radians().sin(),
            UnaryFunction::Cos => x.to_radians().cos(),
            UnaryFunction::Tan => x.to_radians().tan(),
            UnaryFunction::Log10 => {
                if x <= 0.0 {
                    return Err(DomainError::Logarithm);
                }
                x.log10()
            }
            UnaryFunction::Ln => {
                if x <= 0.0 {
                    return Err(DomainError::NaturalLogarithm);
                }
                x.ln()
            }
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Abs => x.abs(),
            UnaryFunction::Factorial => factorial(x)?,
            UnaryFunction::Pi => PI,
            UnaryFunction::E => E,
        };
        finite(value)
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `n!` for a non-negative integer `n`; `0! == 1! == 1`.
pub fn factorial(n: f64) -> Result<f64, DomainError> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(DomainError::Factorial);
    }
    if n > MAX_FACTORIAL_INPUT {
        return Err(DomainError::OutOfRange);
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * f64::from(k)))
}

fn finite(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::OutOfRange)
    }
}
