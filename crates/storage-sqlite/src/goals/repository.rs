use investment_goals_core::goals::{
    validate_division, GoalFilter, InvestmentGoal, InvestmentGoalRepositoryTrait,
    InvestmentGoalUpdate, NewInvestmentGoal,
};
use investment_goals_core::Result;

use super::model::{InvestmentGoalChangesDB, InvestmentGoalDB, NewInvestmentGoalDB};
use crate::db::{exec_write, get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::investment_goals;
use crate::schema::investment_goals::dsl::*;
use crate::utils::{contains_pattern, LIKE_ESCAPE};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct InvestmentGoalRepository {
    pool: Arc<DbPool>,
}

impl InvestmentGoalRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        InvestmentGoalRepository { pool }
    }

    fn to_domain(rows: Vec<InvestmentGoalDB>) -> Result<Vec<InvestmentGoal>> {
        rows.into_iter()
            .map(|row| InvestmentGoal::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl InvestmentGoalRepositoryTrait for InvestmentGoalRepository {
    fn list_goals(&self, filter: &GoalFilter) -> Result<Vec<InvestmentGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = investment_goals::table.into_boxed();

        if let Some(term) = filter.name.as_deref().filter(|t| !t.is_empty()) {
            // SQLite's LIKE ignores ASCII case.
            query = query.filter(name.like(contains_pattern(term)).escape(LIKE_ESCAPE));
        }

        if let Some(target) = filter.month {
            // Months are stored as a JSON array, so the quoted name is an exact element match.
            query = query.filter(months.like(format!("%\"{}\"%", target)));
        }

        let rows = query
            .order((created_at.desc(), id.desc()))
            .select(InvestmentGoalDB::as_select())
            .load::<InvestmentGoalDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn get_goal(&self, goal_id: i64) -> Result<InvestmentGoal> {
        let mut conn = get_connection(&self.pool)?;
        let row = investment_goals
            .find(goal_id)
            .select(InvestmentGoalDB::as_select())
            .first::<InvestmentGoalDB>(&mut conn)
            .into_core()?;
        Ok(InvestmentGoal::try_from(row)?)
    }

    async fn insert_goal(&self, new_goal: NewInvestmentGoal) -> Result<InvestmentGoal> {
        exec_write(&self.pool, move |conn: &mut SqliteConnection| -> Result<InvestmentGoal> {
            let new_goal_db = NewInvestmentGoalDB::from_domain(new_goal, Utc::now().naive_utc())?;

            let result_db = diesel::insert_into(investment_goals::table)
                .values(&new_goal_db)
                .returning(InvestmentGoalDB::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
            Ok(InvestmentGoal::try_from(result_db)?)
        })
        .await
    }

    async fn update_goal(
        &self,
        goal_id: i64,
        changes: InvestmentGoalUpdate,
    ) -> Result<InvestmentGoal> {
        exec_write(&self.pool, move |conn: &mut SqliteConnection| -> Result<InvestmentGoal> {
            let current_db = investment_goals
                .find(goal_id)
                .select(InvestmentGoalDB::as_select())
                .first::<InvestmentGoalDB>(conn)
                .map_err(StorageError::from)?;
            let merged = changes.merge_onto(&InvestmentGoal::try_from(current_db)?);
            validate_division(merged.value, &merged.months)?;

            let changes_db = InvestmentGoalChangesDB::from_domain(changes, Utc::now().naive_utc())?;

            let result_db = diesel::update(investment_goals.find(goal_id))
                .set(&changes_db)
                .returning(InvestmentGoalDB::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
            Ok(InvestmentGoal::try_from(result_db)?)
        })
        .await
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<usize> {
        exec_write(&self.pool, move |conn: &mut SqliteConnection| -> Result<usize> {
            Ok(diesel::delete(investment_goals.find(goal_id))
                .execute(conn)
                .map_err(StorageError::from)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations};
    use investment_goals_core::goals::Month;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    /// Creates a test repository backed by a temp-dir database.
    /// Returns the repository and the temp dir (to keep it alive).
    fn create_test_repository() -> (InvestmentGoalRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        (InvestmentGoalRepository::new(pool), temp_dir)
    }

    fn new_goal(goal_name: &str, goal_months: Vec<Month>, goal_value: rust_decimal::Decimal) -> NewInvestmentGoal {
        NewInvestmentGoal {
            name: goal_name.to_string(),
            months: goal_months,
            value: goal_value,
        }
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let (repo, _temp_dir) = create_test_repository();
        let created = repo
            .insert_goal(new_goal(
                "Trip to Japan",
                vec![Month::January, Month::February, Month::March],
                dec!(3000),
            ))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_goal(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_months_keep_their_order() {
        let (repo, _temp_dir) = create_test_repository();
        let supplied = vec![Month::March, Month::January, Month::March];
        let created = repo
            .insert_goal(new_goal("Repeats", supplied.clone(), dec!(3)))
            .await
            .unwrap();
        assert_eq!(repo.get_goal(created.id).unwrap().months, supplied);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (repo, _temp_dir) = create_test_repository();
        let first = repo
            .insert_goal(new_goal("First", vec![Month::May], dec!(10)))
            .await
            .unwrap();
        let second = repo
            .insert_goal(new_goal("Second", vec![Month::May], dec!(20)))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .list_goals(&GoalFilter::default())
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_filters_by_month_membership() {
        let (repo, _temp_dir) = create_test_repository();
        repo.insert_goal(new_goal("Goal A", vec![Month::January, Month::February], dec!(4000)))
            .await
            .unwrap();
        repo.insert_goal(new_goal("Goal B", vec![Month::December], dec!(2500)))
            .await
            .unwrap();

        let filter = GoalFilter {
            month: Some(Month::December),
            ..Default::default()
        };
        let found = repo.list_goals(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|g| g.months.contains(&Month::December)));
    }

    #[tokio::test]
    async fn test_list_filters_by_name_ignoring_case() {
        let (repo, _temp_dir) = create_test_repository();
        repo.insert_goal(new_goal("Emergency Fund", vec![Month::April], dec!(100)))
            .await
            .unwrap();
        repo.insert_goal(new_goal("New Car", vec![Month::April], dec!(100)))
            .await
            .unwrap();
        repo.insert_goal(new_goal("100% savings", vec![Month::April], dec!(100)))
            .await
            .unwrap();

        let by_name = |term: &str| {
            repo.list_goals(&GoalFilter {
                name: Some(term.to_string()),
                ..Default::default()
            })
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect::<Vec<_>>()
        };

        assert_eq!(by_name("FUND"), vec!["Emergency Fund"]);
        assert_eq!(by_name("car"), vec!["New Car"]);
        assert_eq!(by_name("0%"), vec!["100% savings"]);
        assert!(by_name("boat").is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_supplied_columns() {
        let (repo, _temp_dir) = create_test_repository();
        let created = repo
            .insert_goal(new_goal("Trip", vec![Month::June, Month::July], dec!(100)))
            .await
            .unwrap();

        let updated = repo
            .update_goal(
                created.id,
                InvestmentGoalUpdate {
                    name: Some("Longer trip".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Longer trip");
        assert_eq!(updated.months, created.months);
        assert_eq!(updated.value, created.value);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_merged_goal_that_splits_unevenly() {
        let (repo, _temp_dir) = create_test_repository();
        let created = repo
            .insert_goal(new_goal(
                "Quarter",
                vec![Month::January, Month::February, Month::March],
                dec!(3),
            ))
            .await
            .unwrap();

        let err = repo
            .update_goal(
                created.id,
                InvestmentGoalUpdate {
                    months: Some(vec![Month::January; 7]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, investment_goals_core::Error::Division(_)));
        assert_eq!(repo.get_goal(created.id).unwrap(), created);
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_the_split_even() {
        let (repo, _temp_dir) = create_test_repository();
        let repo = Arc::new(repo);
        let created = repo
            .insert_goal(new_goal(
                "Quarter",
                vec![Month::January, Month::February, Month::March],
                dec!(3),
            ))
            .await
            .unwrap();

        let goal_id = created.id;

        // Each change is valid against the stored goal; applied together they are not.
        let more_months = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.update_goal(
                    goal_id,
                    InvestmentGoalUpdate {
                        months: Some(vec![Month::May; 4]),
                        ..Default::default()
                    },
                )
                .await
            })
        };
        let smaller_value = {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.update_goal(
                    goal_id,
                    InvestmentGoalUpdate {
                        value: Some(dec!(0.03)),
                        ..Default::default()
                    },
                )
                .await
            })
        };
        let results = [more_months.await.unwrap(), smaller_value.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let stored = repo.get_goal(goal_id).unwrap();
        assert!(validate_division(stored.value, &stored.months).is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_goal_is_not_found() {
        let (repo, _temp_dir) = create_test_repository();
        let err = repo
            .update_goal(
                404,
                InvestmentGoalUpdate {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_the_row() {
        let (repo, _temp_dir) = create_test_repository();
        let created = repo
            .insert_goal(new_goal("Temp", vec![Month::August], dec!(8)))
            .await
            .unwrap();

        assert_eq!(repo.delete_goal(created.id).await.unwrap(), 1);
        assert!(repo.get_goal(created.id).unwrap_err().is_not_found());
        assert_eq!(repo.delete_goal(created.id).await.unwrap(), 0);
    }
}
