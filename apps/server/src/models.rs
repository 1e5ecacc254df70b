//! Request and response bodies for the HTTP API.
//!
//! Request bodies keep every field optional and months as raw strings so that
//! conversion into the core types can report all offending fields at once.
//! Money values travel as exact JSON numbers, never through `f64`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use investment_goals_core::errors::{Error as CoreError, FieldError, ValidationError};
use investment_goals_core::goals::{self as core_goals, parse_month, Month};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct InvestmentGoal {
    pub id: i64,
    pub name: String,
    #[schema(example = json!(["january", "february", "march"]))]
    pub months: Vec<String>,
    #[schema(value_type = f64, example = 3000)]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<core_goals::InvestmentGoal> for InvestmentGoal {
    fn from(g: core_goals::InvestmentGoal) -> Self {
        Self {
            id: g.id,
            name: g.name,
            months: g.months.iter().map(|m| m.as_str().to_string()).collect(),
            value: g.value,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct NewInvestmentGoal {
    #[schema(example = "Trip to Japan", min_length = 1, max_length = 255)]
    pub name: Option<String>,
    #[schema(example = json!(["january", "february", "march"]))]
    pub months: Option<Vec<String>>,
    #[schema(value_type = Option<f64>, example = 3000)]
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub value: Option<Decimal>,
}

/// Partial update; only the supplied fields change.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct InvestmentGoalUpdate {
    #[schema(min_length = 1, max_length = 255)]
    pub name: Option<String>,
    pub months: Option<Vec<String>>,
    #[schema(value_type = Option<f64>)]
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub value: Option<Decimal>,
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct ListGoalsQuery {
    /// Case-insensitive substring of the goal name.
    pub name: Option<String>,
    /// Only goals that include this month.
    pub month: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorBody {
    fn from(e: FieldError) -> Self {
        Self {
            field: e.field,
            message: e.message,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ErrorBody {
    pub code: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorBody>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct IndexResponse {
    pub message: String,
    pub docs: String,
    pub health: String,
}

fn parse_months(raw: &[String], errors: &mut Vec<FieldError>) -> Option<Vec<Month>> {
    let mut months = Vec::with_capacity(raw.len());
    let mut valid = true;
    for (i, name) in raw.iter().enumerate() {
        match parse_month(&format!("months[{}]", i), name) {
            Ok(m) => months.push(m),
            Err(e) => {
                errors.push(e);
                valid = false;
            }
        }
    }
    valid.then_some(months)
}

fn required<T>(field: &str, value: Option<T>, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, format!("{} is required", field)));
    }
    value
}

fn fail(errors: Vec<FieldError>) -> CoreError {
    ValidationError::Fields(errors).into()
}

impl TryFrom<NewInvestmentGoal> for core_goals::NewInvestmentGoal {
    type Error = CoreError;

    fn try_from(req: NewInvestmentGoal) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = required("name", req.name, &mut errors);
        let months = required("months", req.months, &mut errors)
            .and_then(|raw| parse_months(&raw, &mut errors));
        let value = required("value", req.value, &mut errors);

        // Rules for whatever was supplied and well-formed.
        let supplied = core_goals::InvestmentGoalUpdate {
            name: name.clone(),
            months: months.clone(),
            value,
        };
        errors.extend(supplied.field_errors());

        match (name, months, value) {
            (Some(name), Some(months), Some(value)) if errors.is_empty() => Ok(Self {
                name,
                months,
                value,
            }),
            _ => Err(fail(errors)),
        }
    }
}

impl TryFrom<InvestmentGoalUpdate> for core_goals::InvestmentGoalUpdate {
    type Error = CoreError;

    fn try_from(req: InvestmentGoalUpdate) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let months = req.months.and_then(|raw| parse_months(&raw, &mut errors));
        let changes = Self {
            name: req.name,
            months,
            value: req.value,
        };
        if errors.is_empty() {
            Ok(changes)
        } else {
            errors.extend(changes.field_errors());
            Err(fail(errors))
        }
    }
}

impl TryFrom<ListGoalsQuery> for core_goals::GoalFilter {
    type Error = CoreError;

    fn try_from(query: ListGoalsQuery) -> Result<Self, Self::Error> {
        let month = query
            .month
            .filter(|m| !m.is_empty())
            .map(|m| parse_month("month", &m))
            .transpose()
            .map_err(|e| fail(vec![e]))?;
        Ok(Self {
            name: query.name.filter(|n| !n.is_empty()),
            month,
        })
    }
}
