//! Article Repository
//!
//! 기사 문서 관련 저장소 연산을 담당합니다.

use news_core::{ArticleStatus, Collection, Document, DocumentId, ARTICLE_STATUS_FIELD};
use serde_json::Value;

use super::store::{
    DeleteResult, DocumentStore, Filter, InsertResult, StoreResult, UpdateResult,
};

/// Article Repository
pub struct ArticleRepository;

impl ArticleRepository {
    /// 기사 생성
    pub async fn create(store: &dyn DocumentStore, article: Document) -> StoreResult<InsertResult> {
        store.insert_one(Collection::Articles, article).await
    }

    /// 전체 기사 조회
    pub async fn list(store: &dyn DocumentStore) -> StoreResult<Vec<Document>> {
        store.find(Collection::Articles, &Filter::All).await
    }

    /// 기사 상세 조회
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: DocumentId,
    ) -> StoreResult<Option<Document>> {
        store.find_one(Collection::Articles, &Filter::by_id(id)).await
    }

    /// 기사 삭제
    pub async fn delete(store: &dyn DocumentStore, id: DocumentId) -> StoreResult<DeleteResult> {
        store.delete_one(Collection::Articles, &Filter::by_id(id)).await
    }

    /// 기사 상태 변경 (승인 / 프리미엄)
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: DocumentId,
        status: ArticleStatus,
    ) -> StoreResult<UpdateResult> {
        let mut set = Document::new();
        set.insert(
            ARTICLE_STATUS_FIELD.to_string(),
            Value::String(status.as_str().to_string()),
        );
        store.update_one(Collection::Articles, &Filter::by_id(id), set).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_status_transitions() {
        let store = MemoryDocumentStore::new();
        let article = json!({"title": "Breaking", "role": "pending"});
        let created = ArticleRepository::create(&store, article.as_object().cloned().unwrap())
            .await
            .unwrap();
        let id = created.inserted_id;

        ArticleRepository::set_status(&store, id, ArticleStatus::Approved)
            .await
            .unwrap();
        let approved = ArticleRepository::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(approved["role"], "approve");

        ArticleRepository::set_status(&store, id, ArticleStatus::Premium)
            .await
            .unwrap();
        let premium = ArticleRepository::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(premium["role"], "premium");
        assert_eq!(premium["title"], "Breaking");
    }

    #[tokio::test]
    async fn test_delete_missing_article() {
        let store = MemoryDocumentStore::new();
        let result = ArticleRepository::delete(&store, DocumentId::new()).await.unwrap();
        assert_eq!(result.deleted_count, 0);
    }
}
