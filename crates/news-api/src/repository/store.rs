//! 문서 저장소 추상화.
//!
//! 모든 라우트 핸들러는 [`DocumentStore`]를 통해 단일 저장소 연산만 수행합니다.
//! 연산 결과는 클라이언트가 기존에 사용하던 문서 DB 응답 형태
//! (`acknowledged`, `insertedId`, `matchedCount` ...)로 그대로 반환됩니다.

use async_trait::async_trait;
use news_core::{Collection, Document, DocumentId, ID_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),
    #[error("마이그레이션 실패: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("이미 존재하는 문서: {0}")]
    Duplicate(String),
}

/// 저장소 연산 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

/// 문서 조회 조건.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// 모든 문서
    All,
    /// `_id` 일치
    Id(DocumentId),
    /// 최상위 필드 값 일치
    Field { name: String, value: Value },
}

impl Filter {
    /// `_id` 조건.
    pub fn by_id(id: DocumentId) -> Self {
        Filter::Id(id)
    }

    /// 필드 일치 조건.
    pub fn field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// 문서가 조건에 맞는지 확인.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => DocumentId::of(document) == Some(*id),
            Filter::Field { name, value } => document.get(name) == Some(value),
        }
    }

    /// JSONB 포함(`@>`) 연산자용 조건 객체.
    ///
    /// 빈 객체는 모든 JSONB 객체에 포함됩니다.
    pub fn to_containment(&self) -> Value {
        let mut object = Document::new();
        match self {
            Filter::All => {}
            Filter::Id(id) => {
                object.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
            }
            Filter::Field { name, value } => {
                object.insert(name.clone(), value.clone());
            }
        }
        Value::Object(object)
    }
}

/// 삽입 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertResult {
    pub fn new(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// 갱신 결과.
///
/// `modified_count`는 `$set` 값이 이미 반영되어 있으면 0입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<DocumentId>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// 삭제 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// 문서 저장소.
///
/// 각 연산은 저장소에 대한 단일 원자적 호출입니다.
/// 구현체는 여러 요청에서 동시에 사용할 수 있어야 합니다.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 문서 삽입. 새 `_id`가 부여되며 호출자가 보낸 `_id`는 무시됩니다.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> StoreResult<InsertResult>;

    /// 조건에 맞는 문서를 삽입 순서대로 조회.
    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// 조건에 맞는 첫 문서 조회.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>>;

    /// 조건에 맞는 첫 문서에 필드 값 설정 (`$set`).
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<UpdateResult>;

    /// 조건에 맞는 첫 문서 삭제.
    async fn delete_one(&self, collection: Collection, filter: &Filter)
        -> StoreResult<DeleteResult>;

    /// 연결 상태 확인.
    async fn ping(&self) -> StoreResult<()>;

    /// 저장소 종류 ("postgres" | "memory").
    fn backend(&self) -> &'static str;
}

/// 삽입할 문서에 새 `_id`를 부여합니다.
pub(crate) fn assign_id(mut document: Document) -> (DocumentId, Document) {
    let id = DocumentId::new();
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    (id, document)
}

/// `$set` 문서에서 변경할 수 없는 `_id`를 제거합니다.
pub(crate) fn strip_id(mut set: Document) -> Document {
    set.remove(ID_FIELD);
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_matches() {
        let id = DocumentId::new();
        let document = doc(json!({"_id": id.to_string(), "email": "a@b.com"}));

        assert!(Filter::All.matches(&document));
        assert!(Filter::by_id(id).matches(&document));
        assert!(!Filter::by_id(DocumentId::new()).matches(&document));
        assert!(Filter::field("email", "a@b.com").matches(&document));
        assert!(!Filter::field("email", "x@y.com").matches(&document));
        assert!(!Filter::field("role", "admin").matches(&document));
    }

    #[test]
    fn test_filter_containment() {
        let id = DocumentId::new();
        assert_eq!(Filter::All.to_containment(), json!({}));
        assert_eq!(
            Filter::by_id(id).to_containment(),
            json!({"_id": id.to_string()})
        );
        assert_eq!(
            Filter::field("email", "a@b.com").to_containment(),
            json!({"email": "a@b.com"})
        );
    }

    #[test]
    fn test_assign_id_replaces_caller_id() {
        let (id, document) = assign_id(doc(json!({"_id": "caller", "title": "t"})));
        assert_eq!(DocumentId::of(&document), Some(id));
        assert_eq!(document["title"], "t");
    }

    #[test]
    fn test_result_wire_format() {
        let id = DocumentId::new();
        let insert = serde_json::to_value(InsertResult::new(id)).unwrap();
        assert_eq!(insert, json!({"acknowledged": true, "insertedId": id.to_string()}));

        let update = serde_json::to_value(UpdateResult::new(1, 0)).unwrap();
        assert_eq!(
            update,
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 0,
                "upsertedId": null,
                "upsertedCount": 0
            })
        );

        let delete = serde_json::to_value(DeleteResult::new(1)).unwrap();
        assert_eq!(delete, json!({"acknowledged": true, "deletedCount": 1}));
    }
}
