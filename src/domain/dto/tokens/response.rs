use serde::{Deserialize, Serialize};
use crate::domain::models::oauth::SpotifyTokenResponse;

/// `POST /auth/refresh` 응답
///
/// Spotify가 새 리프레시 토큰을 회전시킨 경우에만 `refresh_token`이 포함됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl From<SpotifyTokenResponse> for RefreshResponse {
    fn from(response: SpotifyTokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            expires_in: response.expires_in,
            token_type: response.token_type,
            refresh_token: response.refresh_token,
        }
    }
}
