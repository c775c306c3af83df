//! 기사 endpoint.
//!
//! 등록/조회/삭제와 승인·프리미엄 상태 변경을 제공합니다.
//! 상태 변경은 토큰 검증이 필요하며, 설정에 따라 관리자 검사가 추가됩니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch},
    Json, Router,
};
use news_core::{ArticleStatus, Document};
use serde_json::Value;
use tracing::info;

use crate::auth::JwtAuth;
use crate::error::{db_error, json_object, parse_id, ApiResult};
use crate::repository::{ArticleRepository, DeleteResult, InsertResult, UpdateResult};
use crate::state::AppState;

/// POST /articles
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InsertResult>> {
    let article = json_object(payload)?;
    let result = ArticleRepository::create(state.store.as_ref(), article)
        .await
        .map_err(db_error)?;
    Ok(Json(result))
}

/// GET /articles
pub async fn list_articles(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    let articles = ArticleRepository::list(state.store.as_ref())
        .await
        .map_err(db_error)?;
    Ok(Json(articles))
}

/// 기사 상세 조회. 없으면 `null`.
///
/// GET /articles/{id}
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Document>>> {
    let id = parse_id(&id)?;
    let article = ArticleRepository::find_by_id(state.store.as_ref(), id)
        .await
        .map_err(db_error)?;
    Ok(Json(article))
}

/// DELETE /articles/{id}
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let result = ArticleRepository::delete(state.store.as_ref(), id)
        .await
        .map_err(db_error)?;
    Ok(Json(result))
}

/// PATCH /articles/approved/{id}
pub async fn approve_article(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    transition(&state, claims.email.as_deref(), &id, ArticleStatus::Approved).await
}

/// PATCH /articles/premium/{id}
pub async fn make_article_premium(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    transition(&state, claims.email.as_deref(), &id, ArticleStatus::Premium).await
}

async fn transition(
    state: &AppState,
    actor: Option<&str>,
    id: &str,
    status: ArticleStatus,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(id)?;
    let result = ArticleRepository::set_status(state.store.as_ref(), id, status)
        .await
        .map_err(db_error)?;

    info!(%id, %status, actor = ?actor, matched = result.matched_count, "Article status changed");
    Ok(Json(result))
}

/// 기사 라우터 생성.
pub fn articles_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/{id}", get(get_article).delete(delete_article))
}

/// 기사 상태 변경 라우터 생성.
///
/// 관리자 검사 적용 여부는 [`super::create_api_router`]가 결정합니다.
pub fn article_admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles/approved/{id}", patch(approve_article))
        .route("/articles/premium/{id}", patch(make_article_premium))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, bearer, send};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn create(state: &Arc<AppState>, body: Value) -> String {
        let (status, created) = send(app(state), Method::POST, "/articles", None, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        created["insertedId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_article_crud() {
        let state = Arc::new(create_test_state());
        let id = create(&state, json!({"title": "Breaking", "_id": "client-chosen"})).await;
        assert_ne!(id, "client-chosen");

        let (_, article) =
            send(app(&state), Method::GET, &format!("/articles/{id}"), None, None).await;
        assert_eq!(article["title"], "Breaking");
        assert_eq!(article["_id"], id.as_str());

        let (_, list) = send(app(&state), Method::GET, "/articles", None, None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, deleted) =
            send(app(&state), Method::DELETE, &format!("/articles/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"acknowledged": true, "deletedCount": 1}));

        let (status, missing) =
            send(app(&state), Method::GET, &format!("/articles/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn test_create_rejects_non_object() {
        let state = Arc::new(create_test_state());
        let (status, _) =
            send(app(&state), Method::POST, "/articles", None, Some(json!([1, 2, 3]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let state = Arc::new(create_test_state());
        let (status, body) = send(app(&state), Method::GET, "/articles/12345", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ID");
    }

    #[tokio::test]
    async fn test_status_transitions_require_token() {
        let state = Arc::new(create_test_state());
        let id = create(&state, json!({"title": "Draft"})).await;

        let (status, _) = send(
            app(&state),
            Method::PATCH,
            &format!("/articles/approved/{id}"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let auth = bearer(&state, "editor@news.com");
        let (status, result) = send(
            app(&state),
            Method::PATCH,
            &format!("/articles/approved/{id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["modifiedCount"], 1);

        let (_, result) = send(
            app(&state),
            Method::PATCH,
            &format!("/articles/premium/{id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(result["modifiedCount"], 1);

        let (_, article) =
            send(app(&state), Method::GET, &format!("/articles/{id}"), None, None).await;
        assert_eq!(article["role"], "premium");
    }
}
