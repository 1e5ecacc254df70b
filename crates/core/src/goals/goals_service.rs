use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{DatabaseError, Result};
use crate::goals::goals_division::validate_division;
use crate::goals::goals_model::{GoalFilter, InvestmentGoal, InvestmentGoalUpdate, NewInvestmentGoal};
use crate::goals::goals_traits::{InvestmentGoalRepositoryTrait, InvestmentGoalServiceTrait};

pub struct InvestmentGoalService {
    goal_repo: Arc<dyn InvestmentGoalRepositoryTrait>,
}

impl InvestmentGoalService {
    pub fn new(goal_repo: Arc<dyn InvestmentGoalRepositoryTrait>) -> Self {
        InvestmentGoalService { goal_repo }
    }
}

#[async_trait]
impl InvestmentGoalServiceTrait for InvestmentGoalService {
    fn get_goals(&self, filter: &GoalFilter) -> Result<Vec<InvestmentGoal>> {
        self.goal_repo.list_goals(filter)
    }

    fn get_goal(&self, goal_id: i64) -> Result<InvestmentGoal> {
        self.goal_repo.get_goal(goal_id)
    }

    async fn create_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal> {
        new_goal.validate()?;
        let plan = validate_division(new_goal.value, &new_goal.months)?;
        debug!("Creating goal '{}': {}", new_goal.name, plan.message);
        self.goal_repo.insert_goal(new_goal).await
    }

    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<InvestmentGoal> {
        changes.validate()?;
        debug!("Updating goal {}", goal_id);

        // The repository re-checks the merged goal inside its write transaction.
        self.goal_repo.update_goal(goal_id, changes).await
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<()> {
        let deleted = self.goal_repo.delete_goal(goal_id).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("investment goal {}", goal_id)).into());
        }
        Ok(())
    }
}
