//! 로컬 토큰 생성
//!
//! 이메일/비밀번호 로그인에 쓰이는 불투명 토큰을 만듭니다.
//!
//! | 종류 | 형식 |
//! |------|------|
//! | 액세스 | `token_<user_id>_<epoch_millis>` |
//! | 리프레시 | `refresh_<user_id>_<epoch_millis>` |
//!
//! 서명이 없는 식별자일 뿐이므로 서버는 이 토큰으로 아무것도 인가하지 않습니다.
//! `token_` 접두사는 Spotify 토큰과 구분하는 용도로만 사용됩니다.

use chrono::Utc;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;

pub const LOCAL_ACCESS_TOKEN_PREFIX: &str = "token_";
pub const LOCAL_REFRESH_TOKEN_PREFIX: &str = "refresh_";

pub struct TokenService;

impl TokenService {
    pub fn generate_token_pair(user: &User) -> Result<TokenPair, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let issued_at = Utc::now().timestamp_millis();

        Ok(TokenPair::new(
            format!("{}{}_{}", LOCAL_ACCESS_TOKEN_PREFIX, user_id, issued_at),
            format!("{}{}_{}", LOCAL_REFRESH_TOKEN_PREFIX, user_id, issued_at),
        ))
    }

    /// 로컬에서 생성된 액세스 토큰인지 확인합니다.
    pub fn is_local_token(token: &str) -> bool {
        token.starts_with(LOCAL_ACCESS_TOKEN_PREFIX)
    }

    /// `Authorization: Bearer <token>` 헤더 값에서 토큰을 추출합니다.
    ///
    /// 스킴이 다르거나 토큰이 비어 있으면 `None`입니다.
    pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn saved_user() -> User {
        let mut user = User::new_local("me@example.com", "Me", None, "hash".to_string()).unwrap();
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_generate_token_pair_format() {
        let user = saved_user();
        let id = user.id_string().unwrap();

        let pair = TokenService::generate_token_pair(&user).unwrap();

        assert!(pair.access_token.starts_with(&format!("token_{}_", id)));
        assert!(pair.refresh_token.starts_with(&format!("refresh_{}_", id)));
        assert!(pair.expires_in.is_none());
        assert!(TokenService::is_local_token(&pair.access_token));
    }

    #[test]
    fn test_unsaved_user_has_no_token() {
        let user = User::new_local("me@example.com", "Me", None, "hash".to_string()).unwrap();

        assert!(TokenService::generate_token_pair(&user).is_err());
    }

    #[test]
    fn test_spotify_token_is_not_local() {
        assert!(!TokenService::is_local_token("BQDj3x..."));
        assert!(TokenService::is_local_token("token_abc"));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(TokenService::extract_bearer_token("Bearer   "), None);
        assert_eq!(TokenService::extract_bearer_token("Basic abc"), None);
        assert_eq!(TokenService::extract_bearer_token("bearer abc"), None);
    }
}
