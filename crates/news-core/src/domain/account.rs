//! 계정 역할.
//!
//! 계정 문서의 `role` 필드가 권한 수준을 결정합니다.
//! `"admin"`만 관리자 권한이며, 그 외 값이나 필드가 없으면 일반 사용자입니다.

use serde::{Deserialize, Serialize};

use super::document::Document;

/// 관리자 역할 값.
pub const ADMIN_ROLE: &str = "admin";

/// 역할 필드 이름.
pub const ROLE_FIELD: &str = "role";

/// 이메일 필드 이름.
pub const EMAIL_FIELD: &str = "email";

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자 - 권한 상승된 계정
    Admin,
    /// 일반 사용자
    User,
}

impl Role {
    /// 계정 문서에서 역할을 읽습니다.
    pub fn of(account: &Document) -> Self {
        account
            .get(ROLE_FIELD)
            .and_then(|v| v.as_str())
            .map(Role::parse)
            .unwrap_or(Role::User)
    }

    /// 문자열에서 역할 파싱. 알 수 없는 값은 일반 사용자로 취급합니다.
    pub fn parse(s: &str) -> Self {
        if s == ADMIN_ROLE {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// 관리자 권한 여부.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => ADMIN_ROLE,
            Role::User => "user",
        };
        write!(f, "{}", s)
    }
}
