//! Investment goal domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed month enumeration a goal can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Month {
    type Err = String;

    /// Month names are matched exactly; `January` or `janeiro` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("invalid month '{}'", s))
    }
}

/// Domain model representing a persisted investment goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentGoal {
    pub id: i64,
    pub name: String,
    pub months: Vec<Month>,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewInvestmentGoal {
    pub name: String,
    pub months: Vec<Month>,
    pub value: Decimal,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvestmentGoalUpdate {
    pub name: Option<String>,
    pub months: Option<Vec<Month>>,
    pub value: Option<Decimal>,
}

impl InvestmentGoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.months.is_none() && self.value.is_none()
    }

    /// The goal as it would look once this update is applied.
    pub fn merge_onto(&self, current: &InvestmentGoal) -> NewInvestmentGoal {
        NewInvestmentGoal {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            months: self.months.clone().unwrap_or_else(|| current.months.clone()),
            value: self.value.unwrap_or(current.value),
        }
    }
}

/// Optional list filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalFilter {
    /// Case-insensitive substring of the goal name.
    pub name: Option<String>,
    /// Goals whose month list contains this month.
    pub month: Option<Month>,
}
