use serde::{Deserialize, Serialize};

/// 액세스 토큰 + 리프레시 토큰 쌍
///
/// Spotify가 발급했거나 로컬에서 생성한 불투명 토큰입니다.
/// 서버에 저장하지 않으며, 클라이언트에 전달된 뒤로는 클라이언트가 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초). 로컬 토큰은 만료 정보가 없습니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in: None,
        }
    }

    pub fn with_expiry(mut self, expires_in: Option<i64>) -> Self {
        self.expires_in = expires_in;
        self
    }
}
