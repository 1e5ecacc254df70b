//! Field rules for goal inputs.
//!
//! Every rule reports a [`FieldError`] instead of failing fast, so callers
//! can return all offending fields in one response.

use rust_decimal::Decimal;

use super::goals_model::{InvestmentGoalUpdate, Month, NewInvestmentGoal};
use crate::errors::{FieldError, Result, ValidationError};

pub const NAME_MAX_LEN: usize = 255;

pub(crate) fn check_name(name: &str) -> Option<FieldError> {
    if name.is_empty() {
        Some(FieldError::new("name", "name is required"))
    } else if name.chars().count() > NAME_MAX_LEN {
        Some(FieldError::new(
            "name",
            format!("name must be at most {} characters", NAME_MAX_LEN),
        ))
    } else {
        None
    }
}

pub(crate) fn check_months(months: &[Month]) -> Option<FieldError> {
    months
        .is_empty()
        .then(|| FieldError::new("months", "at least one month must be selected"))
}

pub(crate) fn check_value(value: Decimal) -> Option<FieldError> {
    (value <= Decimal::ZERO).then(|| FieldError::new("value", "value must be greater than zero"))
}

fn into_result(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(errors).into())
    }
}

impl NewInvestmentGoal {
    pub fn field_errors(&self) -> Vec<FieldError> {
        [
            check_name(&self.name),
            check_months(&self.months),
            check_value(self.value),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        into_result(self.field_errors())
    }
}

impl InvestmentGoalUpdate {
    /// Rules for the supplied fields only.
    pub fn field_errors(&self) -> Vec<FieldError> {
        [
            self.name.as_deref().and_then(check_name),
            self.months.as_deref().and_then(check_months),
            self.value.and_then(check_value),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ValidationError::InvalidInput(
                "at least one of name, months or value must be supplied".to_string(),
            )
            .into());
        }
        into_result(self.field_errors())
    }
}

/// Parses a month name, reporting the offending field on failure.
pub fn parse_month(field: &str, raw: &str) -> std::result::Result<Month, FieldError> {
    raw.parse::<Month>().map_err(|msg| FieldError::new(field, msg))
}

/// Parses a path id; only canonical positive integers (`1`, not `01` or `+1`) are accepted.
pub fn parse_goal_id(raw: &str) -> Result<i64> {
    let canonical = !raw.is_empty()
        && !raw.starts_with('0')
        && raw.bytes().all(|b| b.is_ascii_digit());
    match raw.parse::<i64>() {
        Ok(id) if canonical && id > 0 => Ok(id),
        _ => Err(ValidationError::Fields(vec![FieldError::new(
            "id",
            "id must be a positive integer",
        )])
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn fields_of(err: Error) -> Vec<String> {
        match err {
            Error::Validation(v) => v.field_errors().into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_goal_passes() {
        let goal = NewInvestmentGoal {
            name: "Emergency fund".to_string(),
            months: vec![Month::April],
            value: dec!(500),
        };
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn every_bad_field_is_reported() {
        let goal = NewInvestmentGoal {
            name: String::new(),
            months: vec![],
            value: dec!(-1),
        };
        assert_eq!(fields_of(goal.validate().unwrap_err()), ["name", "months", "value"]);
    }

    #[test]
    fn name_length_is_counted_in_characters() {
        let ok = "ã".repeat(NAME_MAX_LEN);
        assert!(check_name(&ok).is_none());
        let too_long = "a".repeat(NAME_MAX_LEN + 1);
        assert!(check_name(&too_long).is_some());
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = InvestmentGoalUpdate::default().validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_checks_only_supplied_fields() {
        let update = InvestmentGoalUpdate {
            value: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(fields_of(update.validate().unwrap_err()), ["value"]);

        let update = InvestmentGoalUpdate {
            name: Some("Car".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn goal_ids_must_be_positive_integers() {
        assert_eq!(parse_goal_id("42").unwrap(), 42);
        for raw in ["0", "-3", "abc", "1.5", "", " 1", "1 ", "+1", "01", "99999999999999999999"] {
            assert_eq!(fields_of(parse_goal_id(raw).unwrap_err()), ["id"]);
        }
    }

    #[test]
    fn month_parse_names_the_field() {
        let err = parse_month("months[2]", "janeiro").unwrap_err();
        assert_eq!(err.field, "months[2]");
        assert_eq!(err.message, "invalid month 'janeiro'");
    }
}
