//! Repository pattern for database operations.
//!
//! 저장소 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 저장소 구현은 [`DocumentStore`] trait 뒤에 숨겨지며,
//! 각 Repository는 static methods 패턴을 사용합니다.

pub mod articles;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod users;

pub use articles::ArticleRepository;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{
    DeleteResult, DocumentStore, Filter, InsertResult, StoreError, StoreResult, UpdateResult,
};
pub use users::{Registration, UserRepository};
