use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

/// 클라이언트에 노출되는 사용자 요약
///
/// 비밀번호 해시와 타임스탬프는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: String,
    pub email: Option<String>,
    pub name: String,
    pub spotify_id: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            name: user.name.clone(),
            spotify_id: user.spotify_id.clone(),
        }
    }
}

/// `POST /auth/register` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserSummary,
    pub message: String,
}

impl RegisterResponse {
    pub fn new(user: &User) -> Self {
        Self {
            user: UserSummary::from(user),
            message: "회원가입이 완료되었습니다".to_string(),
        }
    }
}
