//! Memory register (M+, M−, MR, MC).
//!
//! Uses `rust_decimal` internally so that accumulating typed numerals is
//! exact: adding `0.1` three times recalls `0.3`, not `0.30000000000000004`.

use crate::error::DomainError;
use crate::numeral;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// An exact decimal accumulator.
///
/// # Examples
///
/// ```
/// use calculator_engine::MemoryRegister;
///
/// let mut memory = MemoryRegister::default();
/// memory.add("0.1").unwrap();
/// memory.add("0.2").unwrap();
/// assert_eq!(memory.to_string(), "0.3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryRegister(Decimal);

impl MemoryRegister {
    /// Empty register.
    pub const ZERO: Self = MemoryRegister(Decimal::ZERO);

    /// Returns `true` if nothing is stored.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds a numeral to the register.
    ///
    /// Fails with [`DomainError::OutOfRange`] if the numeral or the sum does
    /// not fit; the register is left untouched in that case.
    pub fn add(&mut self, numeral: &str) -> Result<(), DomainError> {
        let operand = Self::parse(numeral)?;
        self.0 = self.0.checked_add(operand).ok_or(DomainError::OutOfRange)?;
        Ok(())
    }

    /// Subtracts a numeral from the register.
    pub fn subtract(&mut self, numeral: &str) -> Result<(), DomainError> {
        let operand = Self::parse(numeral)?;
        self.0 = self.0.checked_sub(operand).ok_or(DomainError::OutOfRange)?;
        Ok(())
    }

    /// Resets the register to zero.
    pub fn clear(&mut self) {
        self.0 = Decimal::ZERO;
    }

    fn parse(numeral: &str) -> Result<Decimal, DomainError> {
        if !numeral::is_valid(numeral) {
            return Err(DomainError::OutOfRange);
        }
        Decimal::from_str(numeral.trim_end_matches('.')).map_err(|_| DomainError::OutOfRange)
    }
}

impl fmt::Display for MemoryRegister {
    /// Renders the stored value as a numeral without trailing zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            return f.write_str("0");
        }
        write!(f, "{}", self.0.normalize())
    }
}
