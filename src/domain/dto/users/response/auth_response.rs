use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;
use super::user_response::UserSummary;

/// `POST /auth/login-password` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub user: UserSummary,
}

impl LoginResponse {
    pub fn new(user: &User, tokens: TokenPair) -> Self {
        let user = UserSummary::from(user);

        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_id: user.id.clone(),
            user,
        }
    }
}

/// 가입 확인 경로
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMethod {
    Email,
    Spotify,
}

/// `POST /auth/check-registration` 응답
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationStatus {
    pub registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<RegistrationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl RegistrationStatus {
    pub fn registered(method: RegistrationMethod, user: &User) -> Self {
        Self {
            registered: true,
            method: Some(method),
            user: Some(UserSummary::from(user)),
        }
    }

    pub fn not_registered() -> Self {
        Self {
            registered: false,
            method: None,
            user: None,
        }
    }
}
