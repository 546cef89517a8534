//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 데이터 구조입니다. 엔티티를 그대로 노출하지 않고
//! 필요한 필드만 담은 DTO로 변환해서 응답합니다.

pub mod users;
pub mod tokens;

pub use users::request::{CheckRegistrationRequest, OAuthCallbackQuery, PasswordLoginRequest, RegisterRequest};
pub use users::response::{LoginResponse, RegisterResponse, RegistrationMethod, RegistrationStatus, UserSummary};
pub use tokens::{RefreshResponse, RefreshTokenRequest};
