//! SQLite storage implementation for investment goals.

mod model;
mod repository;

pub use model::{InvestmentGoalChangesDB, InvestmentGoalDB, NewInvestmentGoalDB};
pub use repository::InvestmentGoalRepository;
