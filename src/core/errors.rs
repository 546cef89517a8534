//! # Application Error Handling System
//!
//! 인증 백엔드 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! API 스타일 엔드포인트(profile, refresh, login-password 등)에서
//! 일관된 JSON 에러 응답으로 변환됩니다.
//!
//! 브라우저가 리다이렉트되는 엔드포인트(`/auth/callback`)는 이 타입을 HTTP 응답으로
//! 내보내지 않고, 에러 코드를 담은 리다이렉트 URL로 변환합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락 |
//! | `AuthenticationError` | 401 Unauthorized | 잘못된 자격 증명, 유효하지 않은 토큰 |
//! | `TokenExpired` | 401 Unauthorized | 프로바이더가 토큰 만료를 보고함 (`code: TOKEN_EXPIRED`) |
//! | `RefreshFailed` | 401 Unauthorized | 리프레시 토큰 갱신 거부 (`message` 포함) |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 이메일 중복 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | 프로바이더 호출 실패 |
//! | `InternalError` | 500 Internal Server Error | 설정 오류 등 예상치 못한 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn login(email: &str) -> Result<User, AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!     users.find_by_email(email).await?
//!         .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))
//! }
//! ```

use thiserror::Error;

/// 토큰 만료 응답에 포함되는 에러 코드
pub const TOKEN_EXPIRED_CODE: &str = "TOKEN_EXPIRED";

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    ///
    /// 메시지는 그대로 `error` 필드에 실립니다.
    /// 자격 증명 실패 사유를 구분하지 않도록 호출 측에서 메시지를 통일합니다.
    #[error("{0}")]
    AuthenticationError(String),

    /// 프로바이더가 액세스 토큰 만료를 보고함 (401, `code: TOKEN_EXPIRED`)
    #[error("Token expired")]
    TokenExpired(String),

    /// 리프레시 토큰 갱신 실패 (401, `message` 포함)
    #[error("Failed to refresh token")]
    RefreshFailed(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_)
            | AppError::TokenExpired(_)
            | AppError::RefreshFailed(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 기본 형식은 `{"error": "..."}` 이며, 토큰 만료의 경우 클라이언트가
    /// 재로그인을 유도할 수 있도록 `code`와 `message`를 함께 내려줍니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let body = match self {
            AppError::TokenExpired(message) => serde_json::json!({
                "error": self.to_string(),
                "code": TOKEN_EXPIRED_CODE,
                "message": message,
            }),
            AppError::RefreshFailed(message) => serde_json::json!({
                "error": self.to_string(),
                "message": message,
            }),
            _ => serde_json::json!({
                "error": self.to_string()
            }),
        };

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
