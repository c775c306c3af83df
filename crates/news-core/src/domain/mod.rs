//! 도메인 모델.
//!
//! 문서 저장소에 보관되는 데이터의 형태를 정의합니다.

pub mod account;
pub mod article;
pub mod collection;
pub mod document;

pub use account::{Role, ADMIN_ROLE, EMAIL_FIELD, ROLE_FIELD};
pub use article::{ArticleStatus, ARTICLE_STATUS_FIELD};
pub use collection::Collection;
pub use document::{Document, DocumentId, ID_FIELD};
