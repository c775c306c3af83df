//! 계정 endpoint.
//!
//! - POST /users - 계정 등록 (이메일 기준 멱등)
//! - GET /users - 계정 목록
//! - GET /users/admin/{email} - 본인 계정의 관리자 여부
//! - PATCH /user/admin/{id} - 관리자 권한 부여

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch},
    Json, Router,
};
use news_core::{Document, DocumentId, Role, EMAIL_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::{require_same_identity, AuthError, JwtAuth};
use crate::error::{bad_request, db_error, json_object, parse_id, ApiResult};
use crate::repository::{InsertResult, Registration, UpdateResult, UserRepository};
use crate::state::AppState;

/// 이미 등록된 이메일에 대한 응답 문구.
pub const ALREADY_EXISTS_MESSAGE: &str = "user already exist";

/// 계정 등록 응답.
///
/// 새 계정이면 삽입 결과, 이미 있으면 `{"message", "insertedId": null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrationResponse {
    Created(InsertResult),
    AlreadyExists {
        message: String,
        #[serde(rename = "insertedId")]
        inserted_id: Option<DocumentId>,
    },
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        match registration {
            Registration::Created(result) => RegistrationResponse::Created(result),
            Registration::AlreadyExists => RegistrationResponse::AlreadyExists {
                message: ALREADY_EXISTS_MESSAGE.to_string(),
                inserted_id: None,
            },
        }
    }
}

/// 관리자 여부 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// 계정 등록.
///
/// POST /users
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<RegistrationResponse>> {
    let account: Document = json_object(payload)?;
    let email = match account.get(EMAIL_FIELD) {
        Some(Value::String(email)) if !email.is_empty() => email.clone(),
        _ => return Err(bad_request("MISSING_EMAIL", "email 필드가 필요합니다")),
    };

    let registration = UserRepository::register(state.store.as_ref(), &email, account)
        .await
        .map_err(db_error)?;

    match &registration {
        Registration::Created(result) => {
            info!(email = %email, id = %result.inserted_id, "Account registered")
        }
        Registration::AlreadyExists => info!(email = %email, "Account already registered"),
    }

    Ok(Json(registration.into()))
}

/// 계정 목록.
///
/// GET /users
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Document>>> {
    let users = UserRepository::list(state.store.as_ref())
        .await
        .map_err(db_error)?;
    Ok(Json(users))
}

/// 본인 계정의 관리자 여부 조회.
///
/// 경로의 이메일이 토큰의 신원과 다르면 403. 계정이 없으면 `admin: false`.
/// GET /users/admin/{email}
pub async fn admin_status(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AuthError> {
    if let Err(e) = require_same_identity(&claims, &email) {
        warn!(requested = %email, identity = ?claims.email, "Admin status lookup for another identity");
        return Err(e);
    }

    let role = UserRepository::role_of(state.store.as_ref(), &email).await?;
    Ok(Json(AdminStatusResponse {
        admin: role.is_some_and(|role| role == Role::Admin),
    }))
}

/// 관리자 권한 부여.
///
/// PATCH /user/admin/{id}
pub async fn promote_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let result = UserRepository::promote_to_admin(state.store.as_ref(), id)
        .await
        .map_err(db_error)?;

    info!(%id, matched = result.matched_count, "Account promoted to admin");
    Ok(Json(result))
}

/// 계정 라우터 생성.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route("/users/admin/{email}", get(admin_status))
}

/// 권한 부여 라우터 생성.
///
/// 관리자 검사 적용 여부는 [`super::create_api_router`]가 결정합니다.
pub fn user_admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/user/admin/{id}", patch(promote_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, bearer, send};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_register_twice_returns_sentinel() {
        let state = Arc::new(create_test_state());
        let body = json!({"email": "a@b.com", "name": "A"});

        let (status, first) =
            send(app(&state), Method::POST, "/users", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["acknowledged"], true);
        assert!(first["insertedId"].is_string());

        let (status, second) = send(app(&state), Method::POST, "/users", None, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second, json!({"message": "user already exist", "insertedId": null}));

        let (_, users) = send(app(&state), Method::GET, "/users", None, None).await;
        assert_eq!(users.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_requires_email() {
        let state = Arc::new(create_test_state());
        let (status, body) =
            send(app(&state), Method::POST, "/users", None, Some(json!({"name": "A"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_EMAIL");
    }

    #[tokio::test]
    async fn test_admin_status_requires_token() {
        let state = Arc::new(create_test_state());
        let (status, body) =
            send(app(&state), Method::GET, "/users/admin/a@b.com", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_admin_status_for_other_identity_is_forbidden() {
        let state = Arc::new(create_test_state());
        let auth = bearer(&state, "a@b.com");
        let (status, body) =
            send(app(&state), Method::GET, "/users/admin/x@y.com", Some(&auth), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "IDENTITY_MISMATCH");
    }

    #[tokio::test]
    async fn test_promote_then_admin_status() {
        let state = Arc::new(create_test_state());
        let (_, created) = send(
            app(&state),
            Method::POST,
            "/users",
            None,
            Some(json!({"email": "a@b.com"})),
        )
        .await;
        let id = created["insertedId"].as_str().unwrap().to_string();
        let auth = bearer(&state, "a@b.com");

        let (_, before) =
            send(app(&state), Method::GET, "/users/admin/a@b.com", Some(&auth), None).await;
        assert_eq!(before, json!({"admin": false}));

        let (status, updated) =
            send(app(&state), Method::PATCH, &format!("/user/admin/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["matchedCount"], 1);
        assert_eq!(updated["modifiedCount"], 1);

        let (_, after) =
            send(app(&state), Method::GET, "/users/admin/a@b.com", Some(&auth), None).await;
        assert_eq!(after, json!({"admin": true}));
    }

    #[tokio::test]
    async fn test_promote_rejects_malformed_id() {
        let state = Arc::new(create_test_state());
        let (status, body) =
            send(app(&state), Method::PATCH, "/user/admin/not-an-id", None, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ID");
    }
}
