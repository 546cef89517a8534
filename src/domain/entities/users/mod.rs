//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! // Spotify 로그인 사용자
//! let user = User::from_provider(&identity);
//!
//! // 이메일/비밀번호 사용자
//! let local = User::new_local("user@example.com", "Display Name", None, password_hash)?;
//! ```

pub mod user;

pub use user::User;
