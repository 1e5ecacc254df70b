//! Database models for investment goals.
//!
//! SQLite has no array or decimal types: `months` is stored as a JSON array
//! of month names and `value` as decimal text.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use investment_goals_core::goals::{InvestmentGoal, InvestmentGoalUpdate, Month, NewInvestmentGoal};

/// Database model for investment goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentGoalDB {
    pub id: i64,
    pub name: String,
    pub months: String,
    pub value: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
pub struct NewInvestmentGoalDB {
    pub name: String,
    pub months: String,
    pub value: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column changes for a partial update; `None` columns are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_goals)]
pub struct InvestmentGoalChangesDB {
    pub name: Option<String>,
    pub months: Option<String>,
    pub value: Option<String>,
    pub updated_at: NaiveDateTime,
}

pub(crate) fn encode_months(months: &[Month]) -> Result<String, StorageError> {
    serde_json::to_string(months).map_err(|e| StorageError::SerializationError(e.to_string()))
}

fn decode_months(raw: &str) -> Result<Vec<Month>, StorageError> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::SerializationError(format!("Invalid months '{}': {}", raw, e)))
}

fn decode_value(raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::SerializationError(format!("Invalid value '{}': {}", raw, e)))
}

impl NewInvestmentGoalDB {
    pub fn from_domain(domain: NewInvestmentGoal, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            months: encode_months(&domain.months)?,
            name: domain.name,
            value: domain.value.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl InvestmentGoalChangesDB {
    pub fn from_domain(domain: InvestmentGoalUpdate, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            months: domain.months.as_deref().map(encode_months).transpose()?,
            name: domain.name,
            value: domain.value.map(|v| v.to_string()),
            updated_at: now,
        })
    }
}

// Conversion to domain models
impl TryFrom<InvestmentGoalDB> for InvestmentGoal {
    type Error = StorageError;

    fn try_from(db: InvestmentGoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            months: decode_months(&db.months)?,
            value: decode_value(&db.value)?,
            name: db.name,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        })
    }
}
