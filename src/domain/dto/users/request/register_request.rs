use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호 계정 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(equal = 2, message = "국가 코드는 2자리여야 합니다"))]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, name: &str, country: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("me@example.com", "password123", "Me", Some("KR")).validate().is_ok());
        assert!(request("me@example.com", "password123", "Me", None).validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        assert!(request("not-an-email", "password123", "Me", None).validate().is_err());
        assert!(request("me@example.com", "short", "Me", None).validate().is_err());
        assert!(request("me@example.com", "password123", "", None).validate().is_err());
        assert!(request("me@example.com", "password123", "Me", Some("KOR")).validate().is_err());
    }
}
