//! User Repository
//!
//! 계정 문서 관련 저장소 연산을 담당합니다.

use news_core::{Collection, Document, DocumentId, Role, ADMIN_ROLE, EMAIL_FIELD, ROLE_FIELD};
use serde_json::Value;

use super::store::{DocumentStore, Filter, InsertResult, StoreError, StoreResult, UpdateResult};

/// 등록 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    /// 새 계정 생성
    Created(InsertResult),
    /// 같은 이메일의 계정이 이미 존재 (변경 없음)
    AlreadyExists,
}

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 전체 계정 조회
    pub async fn list(store: &dyn DocumentStore) -> StoreResult<Vec<Document>> {
        store.find(Collection::Users, &Filter::All).await
    }

    /// 이메일로 계정 조회
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> StoreResult<Option<Document>> {
        store
            .find_one(Collection::Users, &Filter::field(EMAIL_FIELD, email))
            .await
    }

    /// 계정의 현재 역할 조회. 계정이 없으면 `None`.
    ///
    /// 매 호출마다 저장소에서 다시 읽습니다.
    pub async fn role_of(store: &dyn DocumentStore, email: &str) -> StoreResult<Option<Role>> {
        Ok(Self::find_by_email(store, email)
            .await?
            .map(|account| Role::of(&account)))
    }

    /// 계정 등록 (이메일 기준 멱등).
    ///
    /// 이미 존재하면 아무것도 변경하지 않고 [`Registration::AlreadyExists`]를 반환합니다.
    /// 조회와 삽입 사이에 같은 이메일이 먼저 등록되면 저장소의 유니크 제약이
    /// 중복을 막고, 그 경우도 `AlreadyExists`로 처리합니다.
    pub async fn register(
        store: &dyn DocumentStore,
        email: &str,
        mut account: Document,
    ) -> StoreResult<Registration> {
        if Self::find_by_email(store, email).await?.is_some() {
            return Ok(Registration::AlreadyExists);
        }

        account.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));
        match store.insert_one(Collection::Users, account).await {
            Ok(result) => Ok(Registration::Created(result)),
            Err(StoreError::Duplicate(_)) => Ok(Registration::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    /// 계정을 관리자로 승격
    pub async fn promote_to_admin(
        store: &dyn DocumentStore,
        id: DocumentId,
    ) -> StoreResult<UpdateResult> {
        let mut set = Document::new();
        set.insert(ROLE_FIELD.to_string(), Value::String(ADMIN_ROLE.to_string()));
        store.update_one(Collection::Users, &Filter::by_id(id), set).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryDocumentStore;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let store = MemoryDocumentStore::new();

        let first = UserRepository::register(&store, "a@b.com", doc(json!({"name": "A"})))
            .await
            .unwrap();
        assert!(matches!(first, Registration::Created(_)));

        let second = UserRepository::register(&store, "a@b.com", doc(json!({"name": "B"})))
            .await
            .unwrap();
        assert_eq!(second, Registration::AlreadyExists);

        let users = UserRepository::list(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["name"], "A");
    }

    #[tokio::test]
    async fn test_role_of_follows_promotion() {
        let store = MemoryDocumentStore::new();
        assert_eq!(UserRepository::role_of(&store, "x@y.com").await.unwrap(), None);

        let Registration::Created(created) =
            UserRepository::register(&store, "x@y.com", Document::new()).await.unwrap()
        else {
            panic!("expected new account");
        };
        assert_eq!(
            UserRepository::role_of(&store, "x@y.com").await.unwrap(),
            Some(Role::User)
        );

        let result = UserRepository::promote_to_admin(&store, created.inserted_id)
            .await
            .unwrap();
        assert_eq!(result.modified_count, 1);
        assert_eq!(
            UserRepository::role_of(&store, "x@y.com").await.unwrap(),
            Some(Role::Admin)
        );
    }
}
