//! Spotify Web API 응답 모델
//!
//! `/api/token`, `/v1/me` 응답을 역직렬화하기 위한 타입입니다.
//! 프로필은 `/auth/profile`에서 그대로 클라이언트로 전달되므로 `Serialize`도 구현합니다.

use serde::{Deserialize, Serialize};

/// Spotify 사용자 프로필 (`GET /v1/me`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotifyProfile {
    /// Spotify 사용자 고유 ID
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// `user-read-email` 스코프가 있어야 내려옵니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// `user-read-private` 스코프가 있어야 내려옵니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default)]
    pub images: Vec<SpotifyImage>,

    /// 구독 등급 (`premium`, `free`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(default)]
    pub followers: SpotifyFollowers,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotifyImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpotifyFollowers {
    #[serde(default)]
    pub total: u64,
}

/// 토큰 엔드포인트 응답 (`POST /api/token`)
///
/// `authorization_code` 교환 시에는 `refresh_token`이 항상 포함되지만,
/// `refresh_token` grant 응답에서는 생략될 수 있습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
