//! 프로바이더 프로필의 검증된 투영
//!
//! 외부 응답(`SpotifyProfile`)을 그대로 엔티티로 흘려보내지 않고,
//! 사용자 식별에 필요한 필드만 정리해서 넘깁니다.

use crate::core::errors::AppError;
use crate::utils::string_utils::clean_optional_string;
use super::spotify::SpotifyProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderIdentity {
    /// 프로바이더 사용자 ID (비어 있지 않음)
    pub provider_id: String,
    /// 정리된 이메일 (빈 문자열은 `None`)
    pub email: Option<String>,
    /// 표시 이름. 프로필에 없으면 프로바이더 ID
    pub name: String,
    pub country: Option<String>,
}

impl TryFrom<SpotifyProfile> for ProviderIdentity {
    type Error = AppError;

    fn try_from(profile: SpotifyProfile) -> Result<Self, Self::Error> {
        let provider_id = profile.id.trim().to_string();
        if provider_id.is_empty() {
            return Err(AppError::ExternalServiceError(
                "Spotify profile has no user id".to_string(),
            ));
        }

        let name = clean_optional_string(profile.display_name)
            .unwrap_or_else(|| provider_id.clone());

        Ok(Self {
            email: clean_optional_string(profile.email).map(|email| email.to_lowercase()),
            country: clean_optional_string(profile.country),
            name,
            provider_id,
        })
    }
}
