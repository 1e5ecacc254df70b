mod goals;
mod health;

use std::sync::Arc;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        ErrorBody, FieldErrorBody, HealthResponse, IndexResponse, InvestmentGoal,
        InvestmentGoalUpdate, NewInvestmentGoal,
    },
};
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investment Goals API",
        description = "Manage investment goals split evenly across calendar months"
    ),
    paths(
        health::index,
        health::health,
        goals::list_goals,
        goals::get_goal,
        goals::create_goal,
        goals::update_goal,
        goals::delete_goal
    ),
    components(schemas(
        InvestmentGoal,
        NewInvestmentGoal,
        InvestmentGoalUpdate,
        ErrorBody,
        FieldErrorBody,
        HealthResponse,
        IndexResponse
    )),
    tags((name = "investment-goals", description = "Investment goals"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        cors.allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(health::router())
        .merge(goals::router())
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
}
