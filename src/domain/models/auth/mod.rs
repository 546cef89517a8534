//! 요청 단위 인증 모델

pub mod bearer_token;

pub use bearer_token::BearerToken;
