//! Investment goals module - domain models, validation, services, and traits.

mod goals_division;
mod goals_model;
mod goals_schema;
mod goals_service;
mod goals_traits;

pub use goals_division::{validate_division, DivisionError, DivisionPlan};
pub use goals_model::{
    GoalFilter, InvestmentGoal, InvestmentGoalUpdate, Month, NewInvestmentGoal,
};
pub use goals_schema::{parse_goal_id, parse_month, NAME_MAX_LEN};
pub use goals_service::InvestmentGoalService;
pub use goals_traits::{InvestmentGoalRepositoryTrait, InvestmentGoalServiceTrait};
