use crate::errors::Result;
use crate::goals::goals_model::{GoalFilter, InvestmentGoal, InvestmentGoalUpdate, NewInvestmentGoal};
use async_trait::async_trait;

/// Trait for investment goal repository operations
#[async_trait]
pub trait InvestmentGoalRepositoryTrait: Send + Sync {
    fn list_goals(&self, filter: &GoalFilter) -> Result<Vec<InvestmentGoal>>;
    fn get_goal(&self, goal_id: i64) -> Result<InvestmentGoal>;
    async fn insert_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal>;
    /// Applies `changes` to the stored goal. The merged goal must still pass
    /// `validate_division`; the read, the check and the write happen in one
    /// write transaction.
    async fn update_goal(&self, goal_id: i64, changes: InvestmentGoalUpdate) -> Result<InvestmentGoal>;
    async fn delete_goal(&self, goal_id: i64) -> Result<usize>;
}

/// Trait for investment goal service operations
#[async_trait]
pub trait InvestmentGoalServiceTrait: Send + Sync {
    fn get_goals(&self, filter: &GoalFilter) -> Result<Vec<InvestmentGoal>>;
    fn get_goal(&self, goal_id: i64) -> Result<InvestmentGoal>;
    async fn create_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal>;
    async fn update_goal(&self, goal_id: i64, changes: InvestmentGoalUpdate) -> Result<InvestmentGoal>;
    async fn delete_goal(&self, goal_id: i64) -> Result<()>;
}
