//! 기사 상태.

use serde::{Deserialize, Serialize};

/// 기사 상태 필드 이름.
///
/// 기존 클라이언트와의 호환을 위해 `role` 필드에 상태를 기록합니다.
pub const ARTICLE_STATUS_FIELD: &str = "role";

/// 기사 상태 전이 대상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleStatus {
    /// 승인됨
    #[serde(rename = "approve")]
    Approved,
    /// 프리미엄
    #[serde(rename = "premium")]
    Premium,
}

impl ArticleStatus {
    /// 저장되는 상태 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Approved => "approve",
            ArticleStatus::Premium => "premium",
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
