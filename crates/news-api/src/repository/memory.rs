//! 메모리 문서 저장소.
//!
//! 데이터베이스가 설정되지 않은 개발 환경과 테스트에서 사용합니다.
//! 프로세스 종료 시 모든 데이터가 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use news_core::{Collection, Document, EMAIL_FIELD};
use tokio::sync::RwLock;

use super::store::{
    assign_id, strip_id, DeleteResult, DocumentStore, Filter, InsertResult, StoreError,
    StoreResult, UpdateResult,
};

/// 메모리 문서 저장소.
///
/// 컬렉션별로 삽입 순서를 유지합니다.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> StoreResult<InsertResult> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        // Postgres의 사용자 이메일 유니크 인덱스와 동일한 제약
        if collection == Collection::Users {
            if let Some(email) = document.get(EMAIL_FIELD).and_then(|v| v.as_str()) {
                let exists = documents
                    .iter()
                    .any(|d| d.get(EMAIL_FIELD).and_then(|v| v.as_str()) == Some(email));
                if exists {
                    return Err(StoreError::Duplicate(email.to_string()));
                }
            }
        }

        let (id, document) = assign_id(document);
        documents.push(document);
        Ok(InsertResult::new(id))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<UpdateResult> {
        let set = strip_id(set);
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(UpdateResult::new(0, 0));
        };

        let changed = set.iter().any(|(k, v)| document.get(k) != Some(v));
        if changed {
            document.extend(set);
        }
        Ok(UpdateResult::new(1, u64::from(changed)))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };

        match documents.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
