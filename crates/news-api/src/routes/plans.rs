//! 구독 플랜 endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use news_core::{Collection, Document};

use crate::error::{db_error, parse_id, ApiResult};
use crate::repository::Filter;
use crate::state::AppState;

/// GET /plans
pub async fn list_plans(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    let plans = state
        .store
        .find(Collection::Plans, &Filter::All)
        .await
        .map_err(db_error)?;
    Ok(Json(plans))
}

/// 플랜 상세 조회. 없으면 `null`.
///
/// GET /plans/{id}
pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Document>>> {
    let id = parse_id(&id)?;
    let plan = state
        .store
        .find_one(Collection::Plans, &Filter::by_id(id))
        .await
        .map_err(db_error)?;
    Ok(Json(plan))
}

/// 플랜 라우터 생성.
pub fn plans_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/plans/{id}", get(get_plan))
}
