//! 조회 기록 endpoint.
//!
//! 이메일별 기사 조회 기록을 저장하고 조회합니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use news_core::{Collection, Document, EMAIL_FIELD};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{bad_request, db_error, json_object, ApiResult};
use crate::repository::{Filter, InsertResult};
use crate::state::AppState;

/// 조회 기록 검색 조건.
#[derive(Debug, Deserialize)]
pub struct ViewsQuery {
    pub email: Option<String>,
}

/// POST /views
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InsertResult>> {
    let view = json_object(payload)?;
    let result = state
        .store
        .insert_one(Collection::Views, view)
        .await
        .map_err(db_error)?;
    Ok(Json(result))
}

/// 이메일의 조회 기록.
///
/// GET /views?email=
pub async fn list_views(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewsQuery>,
) -> ApiResult<Json<Vec<Document>>> {
    let email = query
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| bad_request("MISSING_EMAIL", "email 쿼리 파라미터가 필요합니다"))?;

    let views = state
        .store
        .find(Collection::Views, &Filter::field(EMAIL_FIELD, email))
        .await
        .map_err(db_error)?;
    Ok(Json(views))
}

/// 조회 기록 라우터 생성.
pub fn views_router() -> Router<Arc<AppState>> {
    Router::new().route("/views", get(list_views).post(record_view))
}
