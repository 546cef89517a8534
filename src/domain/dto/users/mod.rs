//! # User DTOs
//!
//! 인증 엔드포인트의 요청/응답 본문입니다.
//!
//! | 엔드포인트 | 요청 | 응답 |
//! |-----------|------|------|
//! | `POST /auth/login-password` | [`PasswordLoginRequest`] | [`LoginResponse`] |
//! | `POST /auth/check-registration` | [`CheckRegistrationRequest`] | [`RegistrationStatus`] |
//! | `POST /auth/register` | [`RegisterRequest`] | [`RegisterResponse`] |
//! | `GET /auth/callback` | [`OAuthCallbackQuery`] | 302 리다이렉트 |

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
