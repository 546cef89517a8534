//! 인증/가입 요청 DTO
//!
//! 검증 실패 시 `validator::ValidationErrors`가 발생하며,
//! 핸들러에서 `AppError::ValidationError`(400)로 변환됩니다.

pub mod auth_request;
pub mod register_request;

pub use auth_request::{CheckRegistrationRequest, OAuthCallbackQuery, PasswordLoginRequest};
pub use register_request::RegisterRequest;
