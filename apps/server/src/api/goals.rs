use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{InvestmentGoal, InvestmentGoalUpdate, ListGoalsQuery, NewInvestmentGoal},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use investment_goals_core::goals::{self as core_goals, parse_goal_id};

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

#[utoipa::path(
    get,
    path = "/investment-goals",
    tag = "investment-goals",
    params(ListGoalsQuery),
    responses(
        (status = 200, description = "Goals, newest first", body = [InvestmentGoal]),
        (status = 400, description = "Invalid filter", body = crate::models::ErrorBody),
    )
)]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListGoalsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<InvestmentGoal>>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = core_goals::GoalFilter::try_from(query)?;
    let goals = state.goal_service.get_goals(&filter)?;
    Ok(Json(goals.into_iter().map(InvestmentGoal::from).collect()))
}

#[utoipa::path(
    get,
    path = "/investment-goals/{id}",
    tag = "investment-goals",
    params(("id" = i64, Path, description = "Goal id")),
    responses(
        (status = 200, body = InvestmentGoal),
        (status = 400, description = "Invalid id", body = crate::models::ErrorBody),
        (status = 404, description = "Goal not found", body = crate::models::ErrorBody),
    )
)]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<InvestmentGoal>> {
    let goal_id = parse_goal_id(&id)?;
    let goal = state.goal_service.get_goal(goal_id)?;
    Ok(Json(InvestmentGoal::from(goal)))
}

#[utoipa::path(
    post,
    path = "/investment-goals",
    tag = "investment-goals",
    request_body = NewInvestmentGoal,
    responses(
        (status = 201, body = InvestmentGoal),
        (status = 400, description = "Invalid input or uneven split", body = crate::models::ErrorBody),
    )
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewInvestmentGoal>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<InvestmentGoal>)> {
    let Json(payload) = payload.map_err(bad_json)?;
    let new_goal = core_goals::NewInvestmentGoal::try_from(payload)?;
    let created = state.goal_service.create_goal(new_goal).await?;
    tracing::info!("Created investment goal {}", created.id);
    Ok((StatusCode::CREATED, Json(InvestmentGoal::from(created))))
}

#[utoipa::path(
    put,
    path = "/investment-goals/{id}",
    tag = "investment-goals",
    params(("id" = i64, Path, description = "Goal id")),
    request_body = InvestmentGoalUpdate,
    responses(
        (status = 200, body = InvestmentGoal),
        (status = 400, description = "Invalid input or uneven split", body = crate::models::ErrorBody),
        (status = 404, description = "Goal not found", body = crate::models::ErrorBody),
    )
)]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InvestmentGoalUpdate>, JsonRejection>,
) -> ApiResult<Json<InvestmentGoal>> {
    let goal_id = parse_goal_id(&id)?;
    let Json(payload) = payload.map_err(bad_json)?;
    let changes = core_goals::InvestmentGoalUpdate::try_from(payload)?;
    let updated = state.goal_service.update_goal(goal_id, changes).await?;
    Ok(Json(InvestmentGoal::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/investment-goals/{id}",
    tag = "investment-goals",
    params(("id" = i64, Path, description = "Goal id")),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 400, description = "Invalid id", body = crate::models::ErrorBody),
        (status = 404, description = "Goal not found", body = crate::models::ErrorBody),
    )
)]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let goal_id = parse_goal_id(&id)?;
    state.goal_service.delete_goal(goal_id).await?;
    tracing::info!("Deleted investment goal {}", goal_id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investment-goals", get(list_goals).post(create_goal))
        .route(
            "/investment-goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}
