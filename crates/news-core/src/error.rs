//! 뉴스 포털 공통 에러 타입.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum NewsError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type NewsResult<T> = Result<T, NewsError>;

impl From<config::ConfigError> for NewsError {
    fn from(err: config::ConfigError) -> Self {
        NewsError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NewsError::InvalidInput("bad id".to_string());
        assert_eq!(err.to_string(), "잘못된 입력: bad id");
    }

    #[test]
    fn test_from_config_error() {
        let err: NewsError = config::ConfigError::Message("missing".to_string()).into();
        assert!(matches!(err, NewsError::Config(_)));
    }
}
