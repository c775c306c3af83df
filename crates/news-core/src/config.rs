//! 설정 관리.
//!
//! 설정은 다음 순서로 겹쳐서 로드됩니다 (뒤쪽이 우선):
//!
//! 1. 내장 기본값
//! 2. 설정 파일 (`config/default.toml`, 선택)
//! 3. `NEWS__SECTION__KEY` 형식의 환경 변수
//! 4. 기존 배포에서 사용하던 환경 변수 (`PORT`, `DB_USER`, `DB_PASS`,
//!    `DATABASE_URL`, `ACCESS_TOKEN_SECRET`, `STRIPE_SECRET`, `LOG_FORMAT`)

use std::net::SocketAddr;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{NewsError, NewsResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사.
const ENV_PREFIX: &str = "NEWS";

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 결제 설정
    pub payments: PaymentsConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// CORS 허용 origin 목록 (비어 있으면 모두 허용)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 전체 연결 URL (설정 시 나머지 접속 정보보다 우선)
    pub url: Option<SecretString>,
    /// 사용자 이름
    pub user: Option<String>,
    /// 비밀번호
    pub password: Option<SecretString>,
    /// 호스트 (`host` 또는 `host:port`)
    pub host: String,
    /// 데이터베이스 이름
    pub name: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            host: "localhost".to_string(),
            name: "news".to_string(),
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// 연결 URL 반환.
    ///
    /// `url`이 없으면 사용자/비밀번호/호스트/이름으로 조합합니다.
    /// 사용자나 비밀번호가 없으면 `None` (메모리 저장소 사용).
    /// 비밀번호는 URL 인코딩된 값이어야 합니다.
    pub fn connection_url(&self) -> Option<SecretString> {
        if let Some(url) = &self.url {
            return Some(SecretString::new(url.expose_secret().into()));
        }

        let user = self.user.as_deref()?;
        let password = self.password.as_ref()?;
        let url = format!(
            "postgres://{}:{}@{}/{}",
            user,
            password.expose_secret(),
            self.host,
            self.name
        );
        Some(SecretString::new(url.into_boxed_str()))
    }
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 토큰 서명 키 (HS256)
    pub access_token_secret: Option<SecretString>,
    /// 토큰 유효 시간 (초)
    pub token_ttl_secs: i64,
    /// 관리자 변경 라우트(권한 상승, 기사 상태 전이)에 관리자 검사 적용 여부
    pub enforce_admin_routes: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: None,
            token_ttl_secs: 3600,
            enforce_admin_routes: false,
        }
    }
}

/// 결제 설정.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// Stripe 시크릿 키 (없으면 결제 비활성화)
    pub stripe_secret: Option<SecretString>,
    /// Stripe API 기본 URL
    pub api_base: String,
    /// 결제 통화
    pub currency: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            stripe_secret: None,
            api_base: "https://api.stripe.com".to_string(),
            currency: "usd".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨 필터 (예: "info", "news_api=debug")
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "news_api=info,tower_http=info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> NewsResult<Self> {
        Self::build(config::File::from(path.as_ref()).required(false))
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> NewsResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// TOML 문자열과 환경 변수에서 설정을 로드합니다.
    pub fn from_toml_str(contents: &str) -> NewsResult<Self> {
        Self::build(config::File::from_str(contents, config::FileFormat::Toml))
    }

    fn build<S>(file: S) -> NewsResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Self::build_with_env(file, std::env::vars())
    }

    /// 주어진 환경 변수 목록으로 설정을 조립합니다.
    fn build_with_env<S, I>(file: S, vars: I) -> NewsResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let mut builder = config::Config::builder().add_source(file).add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true)
                .source(Some(vars.iter().cloned().collect())),
        );

        for (name, key) in LEGACY_ENV {
            builder = builder.set_override_option(key, legacy_value(&vars, name))?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값 검증.
    ///
    /// 서명 키가 없으면 서버를 시작할 수 없습니다.
    pub fn validate(&self) -> NewsResult<()> {
        let secret_missing = self
            .auth
            .access_token_secret
            .as_ref()
            .map(|s| s.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if secret_missing {
            return Err(NewsError::Config(
                "auth.access_token_secret (ACCESS_TOKEN_SECRET)이 필요합니다".to_string(),
            ));
        }

        if self.auth.token_ttl_secs <= 0 {
            return Err(NewsError::Config(format!(
                "auth.token_ttl_secs는 양수여야 합니다: {}",
                self.auth.token_ttl_secs
            )));
        }

        if self.payments.currency.trim().is_empty() {
            return Err(NewsError::Config("payments.currency가 비어 있습니다".to_string()));
        }

        Ok(())
    }
}

/// 기존 배포 환경 변수와 대응하는 설정 키.
const LEGACY_ENV: [(&str, &str); 7] = [
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_USER", "database.user"),
    ("DB_PASS", "database.password"),
    ("ACCESS_TOKEN_SECRET", "auth.access_token_secret"),
    ("STRIPE_SECRET", "payments.stripe_secret"),
    ("LOG_FORMAT", "logging.format"),
];

/// 비어 있지 않은 환경 변수 값.
fn legacy_value(vars: &[(String, String)], name: &str) -> Option<String> {
    vars.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .filter(|value| !value.trim().is_empty())
}
