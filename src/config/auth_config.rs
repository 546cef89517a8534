//! 인증 관련 설정
//!
//! 환경 변수에서 한 번 읽어 타입이 있는 구조체로 만들고,
//! 기동 시점에 오케스트레이터와 프로바이더 클라이언트에 주입합니다.
//!
//! # Environment Variables
//!
//! | 변수 | 필수 | 기본값 |
//! |------|------|--------|
//! | `FRONTEND_ORIGIN` | ✅ | - |
//! | `SPOTIFY_CLIENT_ID` | ✅ | - |
//! | `SPOTIFY_CLIENT_SECRET` | ✅ | - |
//! | `SPOTIFY_REDIRECT_URI` | ✅ | - |
//! | `SPOTIFY_AUTH_URI` | | `https://accounts.spotify.com/authorize` |
//! | `SPOTIFY_TOKEN_URI` | | `https://accounts.spotify.com/api/token` |
//! | `SPOTIFY_API_BASE` | | `https://api.spotify.com/v1` |
//! | `SPOTIFY_SCOPES` | | `user-read-email user-read-private user-top-read user-read-recently-played` |

use std::env;
use crate::core::errors::AppError;

pub const DEFAULT_SPOTIFY_AUTH_URI: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URI: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_SCOPES: &str = "user-read-email user-read-private user-top-read user-read-recently-played";

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 오케스트레이터 설정
///
/// 모든 리다이렉트 대상은 `frontend_origin`을 기준으로 만들어집니다.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// 프론트엔드 origin (끝의 `/` 제거됨)
    pub frontend_origin: String,
}

impl AuthConfig {
    pub fn new(frontend_origin: impl Into<String>) -> Self {
        let origin: String = frontend_origin.into();
        Self {
            frontend_origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self::new(required(&lookup, "FRONTEND_ORIGIN")?))
    }

    /// 프론트엔드 로그인 페이지 URL
    pub fn login_page(&self) -> String {
        format!("{}/login", self.frontend_origin)
    }
}

/// Spotify OAuth 2.0 클라이언트 설정
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub api_base: String,
    pub scopes: String,
}

impl SpotifyOAuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            client_id: required(&lookup, "SPOTIFY_CLIENT_ID")?,
            client_secret: required(&lookup, "SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required(&lookup, "SPOTIFY_REDIRECT_URI")?,
            auth_uri: optional(&lookup, "SPOTIFY_AUTH_URI", DEFAULT_SPOTIFY_AUTH_URI),
            token_uri: optional(&lookup, "SPOTIFY_TOKEN_URI", DEFAULT_SPOTIFY_TOKEN_URI),
            api_base: optional(&lookup, "SPOTIFY_API_BASE", DEFAULT_SPOTIFY_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            scopes: optional(&lookup, "SPOTIFY_SCOPES", DEFAULT_SPOTIFY_SCOPES),
        })
    }
}
