//! # HTTP Middlewares
//!
//! - [`BearerAuth`] - `Authorization: Bearer` 헤더 필수 검사, 토큰을 요청 확장에 저장

pub mod bearer_auth;
mod bearer_inner;

pub use bearer_auth::BearerAuth;
