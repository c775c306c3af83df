//! 문서 및 문서 ID.
//!
//! 모든 리소스는 스키마 없는 JSON 객체로 저장되며,
//! 저장 시점에 문자열 `_id` 필드가 부여됩니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NewsError;

/// 문서 ID 필드 이름.
pub const ID_FIELD: &str = "_id";

/// 저장되는 문서 (JSON 객체).
pub type Document = serde_json::Map<String, serde_json::Value>;

/// 문서 ID.
///
/// 저장소가 삽입 시 생성하며, 경로 파라미터로 전달될 때는
/// UUID 문자열 형식이어야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// 새 ID 생성.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 내부 UUID 반환.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// 문서에서 `_id` 필드를 읽습니다.
    pub fn of(document: &Document) -> Option<Self> {
        document
            .get(ID_FIELD)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DocumentId {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| NewsError::InvalidInput(format!("유효하지 않은 문서 ID: {}", s)))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
