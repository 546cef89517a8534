use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 이메일/비밀번호 로그인 요청
///
/// 필드가 아예 없는 경우도 400으로 응답해야 하므로 `default`로 받은 뒤 검증합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "이메일과 비밀번호는 필수입니다"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "이메일과 비밀번호는 필수입니다"))]
    pub password: String,
}

/// 가입 여부 확인 요청
///
/// 이메일 조회가 우선이며, Spotify 토큰은 이메일로 찾지 못한 경우에만 사용됩니다.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRegistrationRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub spotify_token: Option<String>,
}

/// Spotify가 `/auth/callback`으로 넘겨주는 쿼리
///
/// 성공 시 `code`, 사용자가 거부했거나 오류가 난 경우 `error`가 옵니다.
/// 어느 쪽도 없을 수 있으므로 모두 선택 필드입니다.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}
