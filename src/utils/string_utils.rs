//! # 문자열 유틸리티
//!
//! 요청 필드 정리, 리다이렉트 URL에 실을 상세 메시지 절단 등
//! 문자열 처리와 관련된 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 리다이렉트 URL에 실리는 상세 메시지의 최대 길이 (문자 수)
pub const MAX_REDIRECT_DETAIL_CHARS: usize = 200;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Hello  ", "name").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 정리
///
/// 공백만 있는 문자열은 `None`으로 취급합니다.
/// 프로바이더 프로필의 이메일/국가 필드처럼 비어 있을 수 있는 값에 사용합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde 역직렬화 시 선택적 문자열을 정리합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Query {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     code: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 상세 메시지를 리다이렉트 URL에 실을 수 있는 길이로 자릅니다.
///
/// 결과는 항상 `MAX_REDIRECT_DETAIL_CHARS` 문자 이하이며, 잘린 경우 `...`으로 끝납니다.
/// 멀티바이트 문자 경계를 기준으로 자릅니다.
pub fn truncate_detail(message: &str) -> String {
    if message.chars().count() <= MAX_REDIRECT_DETAIL_CHARS {
        return message.to_string();
    }

    let kept: String = message.chars().take(MAX_REDIRECT_DETAIL_CHARS - 3).collect();
    format!("{}...", kept)
}
