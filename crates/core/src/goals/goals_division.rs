//! Checks that a goal's value splits into equal, cent-precise monthly installments.

use rust_decimal::Decimal;
use thiserror::Error;

/// Outcome of a successful division check.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionPlan {
    pub monthly_value: Decimal,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DivisionError {
    #[error("value and months are required")]
    MissingInput,

    #[error("the total value ({total}) cannot be split evenly across {months} months")]
    UnevenDivision { total: Decimal, months: usize },

    #[error("the total value ({0}) is too large to split into monthly installments")]
    OutOfRange(Decimal),
}

/// Splits `total_value` across every entry of `months` (duplicates included).
///
/// The check runs on integer cents: the value is accepted only when
/// `total_value * 100` is a whole number divisible by the month count, which
/// is exactly when the monthly installment has at most two decimal places.
pub fn validate_division<T>(total_value: Decimal, months: &[T]) -> Result<DivisionPlan, DivisionError> {
    if total_value.is_zero() || months.is_empty() {
        return Err(DivisionError::MissingInput);
    }

    let count = Decimal::from(months.len());
    let cents = total_value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(DivisionError::OutOfRange(total_value.normalize()))?;

    if !cents.fract().is_zero() || !(cents % count).is_zero() {
        return Err(DivisionError::UnevenDivision {
            total: total_value.normalize(),
            months: months.len(),
        });
    }

    let monthly_value = (cents / count / Decimal::ONE_HUNDRED).round_dp(2);
    Ok(DivisionPlan {
        monthly_value,
        message: format!("Monthly value: {:.2}", monthly_value),
    })
}
