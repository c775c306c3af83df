//! PostgreSQL 문서 저장소.
//!
//! 모든 컬렉션을 하나의 `documents` 테이블에 JSONB로 저장합니다.
//! 조회 조건은 JSONB 포함 연산자(`@>`)로 변환됩니다.

use std::time::Duration;

use async_trait::async_trait;
use news_core::{Collection, Document};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use super::store::{
    assign_id, strip_id, DeleteResult, DocumentStore, Filter, InsertResult, StoreError,
    StoreResult, UpdateResult,
};

/// PostgreSQL 문서 저장소.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// 새 연결 풀을 생성합니다.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> StoreResult<Self> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(url)
            .await?;

        info!("Database connection established");
        Ok(Self { pool })
    }

    /// 데이터베이스 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> StoreResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully");
        Ok(())
    }
}

/// 유니크 제약 위반을 [`StoreError::Duplicate`]로 변환합니다.
fn map_insert_error(err: sqlx::Error, collection: Collection) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(collection.name().to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> StoreResult<InsertResult> {
        let (id, document) = assign_id(document);

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(collection.name())
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, collection))?;

        Ok(InsertResult::new(id))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let rows: Vec<Json<Document>> = sqlx::query_scalar(
            r#"
            SELECT body FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.to_containment()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Option<Document>> {
        let row: Option<Json<Document>> = sqlx::query_scalar(
            r#"
            SELECT body FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.to_containment()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> StoreResult<UpdateResult> {
        let set = strip_id(set);

        // 이미 같은 값이면 갱신하지 않고 modified 0으로 집계
        let (matched, modified): (i64, i64) = sqlx::query_as(
            r#"
            WITH target AS (
                SELECT id, body FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            ),
            updated AS (
                UPDATE documents d
                SET body = d.body || $3
                FROM target t
                WHERE d.id = t.id AND NOT (t.body @> $3)
                RETURNING d.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.to_containment()))
        .bind(Json(&set))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult::new(matched as u64, modified as u64))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE id = (
                SELECT id FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.to_containment()))
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
