//! User Entity Implementation
//!
//! Spotify 로그인 사용자와 이메일/비밀번호 사용자를 하나의 문서 형태로 표현합니다.
//! 두 식별자(`spotify_id`, `email`) 중 최소 하나는 반드시 존재해야 하며,
//! 이 불변식은 생성자에서 검증합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::models::oauth::ProviderIdentity;
use crate::utils::string_utils::clean_optional_string;

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Spotify 사용자 ID (unique, sparse)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,
    /// 이메일 (unique, sparse)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 표시 이름
    pub name: String,
    /// 국가 코드 (ISO 3166-1 alpha-2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// bcrypt 해시 (이메일/비밀번호 계정만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// Spotify 프로필로부터 새 사용자를 만듭니다.
    pub fn from_provider(identity: &ProviderIdentity) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            spotify_id: Some(identity.provider_id.clone()),
            email: identity.email.clone(),
            name: identity.name.clone(),
            country: identity.country.clone(),
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 이메일/비밀번호 사용자를 만듭니다.
    ///
    /// 이메일이 비어 있으면 식별자 불변식을 만족하지 못하므로 거부합니다.
    pub fn new_local(
        email: &str,
        name: &str,
        country: Option<String>,
        password_hash: String,
    ) -> Result<Self, AppError> {
        let email = clean_optional_string(Some(email.to_string()))
            .ok_or_else(|| AppError::ValidationError("email 또는 spotify_id 중 하나는 필요합니다".to_string()))?;
        let now = DateTime::now();

        Ok(Self {
            id: None,
            spotify_id: None,
            email: Some(email.to_lowercase()),
            name: name.trim().to_string(),
            country: clean_optional_string(country),
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        })
    }

    /// 기존 사용자에 최신 프로바이더 프로필을 반영합니다.
    ///
    /// 프로필에 이메일이 없으면 기존 이메일을 유지합니다.
    pub fn apply_provider_identity(&mut self, identity: &ProviderIdentity) {
        self.spotify_id = Some(identity.provider_id.clone());
        if identity.email.is_some() {
            self.email = identity.email.clone();
        }
        self.name = identity.name.clone();
        self.country = identity.country.clone().or(self.country.take());
        self.updated_at = DateTime::now();
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: Option<&str>, country: Option<&str>) -> ProviderIdentity {
        ProviderIdentity {
            provider_id: "spotify-123".to_string(),
            email: email.map(str::to_string),
            name: "Listener".to_string(),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn test_from_provider_sets_spotify_id() {
        let user = User::from_provider(&identity(Some("a@b.com"), Some("KR")));

        assert_eq!(user.spotify_id.as_deref(), Some("spotify-123"));
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert!(user.password_hash.is_none());
    }

    #[test]
    fn test_new_local_requires_email() {
        assert!(User::new_local("   ", "name", None, "hash".to_string()).is_err());

        let user = User::new_local(" Me@Example.com ", "Me", Some(" ".to_string()), "hash".to_string()).unwrap();
        assert_eq!(user.email.as_deref(), Some("me@example.com"));
        assert_eq!(user.country, None);
        assert_eq!(user.password_hash.as_deref(), Some("hash"));
    }

    #[test]
    fn test_apply_provider_identity_keeps_existing_email_when_profile_has_none() {
        let mut user = User::new_local("me@example.com", "Me", Some("ES".to_string()), "hash".to_string()).unwrap();
        user.apply_provider_identity(&identity(None, None));

        assert_eq!(user.email.as_deref(), Some("me@example.com"));
        assert_eq!(user.spotify_id.as_deref(), Some("spotify-123"));
        assert_eq!(user.country.as_deref(), Some("ES"));
        assert_eq!(user.name, "Listener");
        assert!(user.password_hash.is_some());
    }
}
