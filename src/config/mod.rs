//! 애플리케이션 설정 모듈
//!
//! - [`auth_config`] - 프론트엔드 origin, Spotify OAuth 클라이언트 설정
//! - [`data_config`] - 실행 환경, 서버 바인딩, bcrypt cost, Rate Limiting

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
