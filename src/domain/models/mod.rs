//! # Domain Models Module
//!
//! 영속성이 없는 도메인 모델과 값 객체입니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB에 저장되는 객체 (`User`)
//! - **Models** (`./`): 외부 시스템 응답, 토큰 쌍, 요청 단위 인증 정보처럼
//!   값 자체가 의미를 가지는 객체
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── oauth/   ← Spotify 응답 모델, ProviderIdentity
//! ├── token/   ← TokenPair
//! └── auth/    ← BearerToken 추출기
//! ```

pub mod oauth;
pub mod token;
pub mod auth;

pub use oauth::*;
pub use token::*;
pub use auth::*;
