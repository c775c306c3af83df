//! 역할 기반 접근 제어.
//!
//! 토큰 검증을 통과한 신원에 대해 계정 문서를 조회하고 관리자 권한을 확인합니다.
//! 권한 판단은 캐시하지 않으며 매 요청마다 저장소의 현재 상태를 기준으로 합니다.

use tracing::debug;

use super::{AuthError, Claims};
use crate::repository::{DocumentStore, UserRepository};

/// 검증된 신원이 관리자 계정인지 확인.
///
/// # Errors
///
/// - 토큰에 이메일이 없으면 [`AuthError::MissingIdentity`]
/// - 계정이 없거나 관리자가 아니면 [`AuthError::InsufficientPermission`]
/// - 저장소 조회 실패 시 [`AuthError::Store`]
pub async fn authorize_admin(store: &dyn DocumentStore, claims: &Claims) -> Result<(), AuthError> {
    let email = claims.email.as_deref().ok_or(AuthError::MissingIdentity)?;

    match UserRepository::role_of(store, email).await? {
        Some(role) if role.is_elevated() => Ok(()),
        Some(role) => {
            debug!(email, %role, "Admin check failed: insufficient role");
            Err(AuthError::InsufficientPermission)
        }
        None => {
            debug!(email, "Admin check failed: no account");
            Err(AuthError::InsufficientPermission)
        }
    }
}

/// 요청 대상 이메일이 토큰의 신원과 같은지 확인.
pub fn require_same_identity(claims: &Claims, email: &str) -> Result<(), AuthError> {
    match claims.email.as_deref() {
        Some(own) if own == email => Ok(()),
        Some(_) => Err(AuthError::IdentityMismatch),
        None => Err(AuthError::MissingIdentity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryDocumentStore, Registration};
    use news_core::Document;

    fn claims_for(email: Option<&str>) -> Claims {
        Claims {
            email: email.map(str::to_string),
            iat: 0,
            exp: i64::MAX,
            extra: Document::new(),
        }
    }

    #[tokio::test]
    async fn test_authorize_admin() {
        let store = MemoryDocumentStore::new();
        let Registration::Created(created) =
            UserRepository::register(&store, "boss@news.com", Document::new())
                .await
                .unwrap()
        else {
            panic!("expected new account");
        };
        UserRepository::register(&store, "reader@news.com", Document::new())
            .await
            .unwrap();
        UserRepository::promote_to_admin(&store, created.inserted_id)
            .await
            .unwrap();

        assert!(authorize_admin(&store, &claims_for(Some("boss@news.com"))).await.is_ok());
        assert!(matches!(
            authorize_admin(&store, &claims_for(Some("reader@news.com"))).await,
            Err(AuthError::InsufficientPermission)
        ));
        assert!(matches!(
            authorize_admin(&store, &claims_for(Some("ghost@news.com"))).await,
            Err(AuthError::InsufficientPermission)
        ));
        assert!(matches!(
            authorize_admin(&store, &claims_for(None)).await,
            Err(AuthError::MissingIdentity)
        ));
    }

    #[test]
    fn test_require_same_identity() {
        let claims = claims_for(Some("a@b.com"));
        assert!(require_same_identity(&claims, "a@b.com").is_ok());
        assert!(matches!(
            require_same_identity(&claims, "x@y.com"),
            Err(AuthError::IdentityMismatch)
        ));
        assert!(matches!(
            require_same_identity(&claims_for(None), "a@b.com"),
            Err(AuthError::MissingIdentity)
        ));
    }
}
