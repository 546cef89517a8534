//! Spotify OAuth 2.0 / Web API 클라이언트
//!
//! [`ProviderClient`]는 오케스트레이터가 의존하는 외부 프로바이더 추상화입니다.
//! 운영 구현인 [`SpotifyClient`]는 `reqwest`로 Spotify Accounts 서비스와 Web API를 호출합니다.
//!
//! ## 호출 흐름
//!
//! ```text
//! authorize_url ─▶ (브라우저) ─▶ exchange_code ─▶ fetch_profile
//!                                    │
//!                                 refresh (만료 시)
//! ```
//!
//! 호출에 별도 타임아웃은 두지 않습니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use thiserror::Error;
use crate::config::SpotifyOAuthConfig;
use crate::core::errors::AppError;
use crate::core::registry::{ComponentRegistration, ServiceLocator};
use crate::domain::models::oauth::{SpotifyProfile, SpotifyTokenResponse};
use crate::domain::models::token::TokenPair;

/// 프로바이더 호출 실패 분류
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// 클라이언트 ID/시크릿/리다이렉트 URI 누락
    #[error("Spotify client is misconfigured: {0}")]
    Misconfigured(String),

    /// 프로바이더가 요청을 거부함
    #[error("Spotify rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// 액세스 토큰 만료 (Web API 401)
    #[error("Spotify access token expired")]
    TokenExpired,

    /// 네트워크 오류
    #[error("Spotify is unreachable: {0}")]
    Unreachable(String),

    /// 응답 형식이 예상과 다름
    #[error("Invalid response from Spotify: {0}")]
    InvalidResponse(String),
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::TokenExpired => AppError::TokenExpired(
                "액세스 토큰이 만료되었습니다. 다시 로그인해주세요.".to_string(),
            ),
            ProviderError::Misconfigured(_) => AppError::InternalError(error.to_string()),
            _ => AppError::ExternalServiceError(error.to_string()),
        }
    }
}

/// 외부 OAuth 프로바이더 추상화
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// 사용자를 보낼 인가(authorize) URL을 만듭니다.
    fn authorize_url(&self, state: &str) -> Result<String, ProviderError>;

    /// 인가 코드를 토큰 쌍으로 교환합니다.
    ///
    /// 응답에 리프레시 토큰이 없으면 `InvalidResponse`입니다.
    async fn exchange_code(&self, code: &str) -> Result<TokenPair, ProviderError>;

    /// 리프레시 토큰으로 새 액세스 토큰을 발급받습니다.
    async fn refresh(&self, refresh_token: &str) -> Result<SpotifyTokenResponse, ProviderError>;

    /// 액세스 토큰 소유자의 프로필을 조회합니다.
    async fn fetch_profile(&self, access_token: &str) -> Result<SpotifyProfile, ProviderError>;
}

pub struct SpotifyClient {
    http: reqwest::Client,
    config: SpotifyOAuthConfig,
}

static SPOTIFY_CLIENT_INSTANCE: OnceCell<Arc<SpotifyClient>> = OnceCell::new();

impl SpotifyClient {
    /// 싱글톤 인스턴스를 가져옵니다.
    ///
    /// `SpotifyOAuthConfig`가 `ServiceLocator`에 먼저 등록되어 있어야 합니다.
    pub fn instance() -> Arc<Self> {
        SPOTIFY_CLIENT_INSTANCE
            .get_or_init(|| {
                let config = ServiceLocator::get::<SpotifyOAuthConfig>();
                Arc::new(Self::new(config.as_ref().clone()))
            })
            .clone()
    }

    pub fn new(config: SpotifyOAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn ensure_configured(&self) -> Result<(), ProviderError> {
        let missing: Vec<&str> = [
            ("SPOTIFY_CLIENT_ID", &self.config.client_id),
            ("SPOTIFY_CLIENT_SECRET", &self.config.client_secret),
            ("SPOTIFY_REDIRECT_URI", &self.config.redirect_uri),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| *key)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::Misconfigured(format!("{} not set", missing.join(", "))))
        }
    }

    /// Accounts 서비스(`/api/token`) 호출
    ///
    /// 클라이언트 자격 증명은 HTTP Basic 인증으로 보냅니다.
    async fn request_token(&self, params: &[(&str, &str)]) -> Result<SpotifyTokenResponse, ProviderError> {
        self.ensure_configured()?;

        let response = self.http
            .post(&self.config.token_uri)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(params)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_token_error(status, body));
        }

        response
            .json::<SpotifyTokenResponse>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

/// 토큰 엔드포인트 오류는 모두 거부로 취급합니다.
///
/// 여기서의 401은 클라이언트 자격 증명 문제이지 사용자 토큰 만료가 아닙니다.
pub fn classify_token_error(status: StatusCode, body: String) -> ProviderError {
    ProviderError::Rejected {
        status: status.as_u16(),
        body,
    }
}

/// Web API 오류 분류. 401은 액세스 토큰 만료입니다.
pub fn classify_api_error(status: StatusCode, body: String) -> ProviderError {
    if status == StatusCode::UNAUTHORIZED {
        ProviderError::TokenExpired
    } else {
        ProviderError::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}

/// 인가 URL 조립
pub fn build_authorize_url(config: &SpotifyOAuthConfig, state: &str) -> String {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", config.scopes.as_str()),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.auth_uri, query_string)
}

#[async_trait]
impl ProviderClient for SpotifyClient {
    fn authorize_url(&self, state: &str) -> Result<String, ProviderError> {
        self.ensure_configured()?;
        Ok(build_authorize_url(&self.config, state))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenPair, ProviderError> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.config.redirect_uri),
            ])
            .await?;

        let refresh_token = response.refresh_token.ok_or_else(|| {
            ProviderError::InvalidResponse("token response has no refresh_token".to_string())
        })?;

        Ok(TokenPair::new(response.access_token, refresh_token).with_expiry(response.expires_in))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SpotifyTokenResponse, ProviderError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<SpotifyProfile, ProviderError> {
        let response = self.http
            .get(format!("{}/me", self.config.api_base))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, body));
        }

        response
            .json::<SpotifyProfile>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

fn spotify_client_constructor() -> Arc<dyn std::any::Any + Send + Sync> {
    SpotifyClient::instance()
}

inventory::submit! {
    ComponentRegistration {
        name: "spotify_client",
        constructor: spotify_client_constructor,
    }
}
