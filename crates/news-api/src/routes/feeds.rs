//! 배너 및 읽기 전용 피드 endpoint.
//!
//! - GET / - 서버 동작 배너
//! - GET /demo - 데모 뉴스 목록
//! - GET /trending - 트렌딩 항목 목록

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use news_core::{Collection, Document};

use crate::error::{db_error, ApiResult};
use crate::repository::Filter;
use crate::state::AppState;

/// 루트 배너 문구.
pub const BANNER: &str = "News is running";

/// GET /
pub async fn banner() -> &'static str {
    BANNER
}

/// GET /demo
pub async fn list_demo_news(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    list(&state, Collection::DemoNews).await
}

/// GET /trending
pub async fn list_trending(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    list(&state, Collection::Trending).await
}

async fn list(state: &AppState, collection: Collection) -> ApiResult<Json<Vec<Document>>> {
    let documents = state
        .store
        .find(collection, &Filter::All)
        .await
        .map_err(db_error)?;
    Ok(Json(documents))
}

/// 피드 라우터 생성.
pub fn feeds_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(banner))
        .route("/demo", get(list_demo_news))
        .route("/trending", get(list_trending))
}
