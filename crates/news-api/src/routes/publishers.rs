//! 발행처 endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use news_core::{Collection, Document};
use serde_json::Value;

use crate::error::{db_error, json_object, ApiResult};
use crate::repository::{Filter, InsertResult};
use crate::state::AppState;

/// POST /publisher
pub async fn create_publisher(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InsertResult>> {
    let publisher = json_object(payload)?;
    let result = state
        .store
        .insert_one(Collection::Publishers, publisher)
        .await
        .map_err(db_error)?;
    Ok(Json(result))
}

/// GET /publishers
pub async fn list_publishers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    let publishers = state
        .store
        .find(Collection::Publishers, &Filter::All)
        .await
        .map_err(db_error)?;
    Ok(Json(publishers))
}

/// 발행처 라우터 생성.
pub fn publishers_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/publisher", post(create_publisher))
        .route("/publishers", get(list_publishers))
}
