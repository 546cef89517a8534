//! # Authentication Services
//!
//! - [`auth_service`] - 로그인/콜백/프로필/토큰 갱신 오케스트레이터
//! - [`spotify_client`] - Spotify OAuth/Web API 클라이언트와 `ProviderClient` trait
//! - [`token_service`] - 로컬 불투명 토큰 생성, Bearer 헤더 파싱

pub mod auth_service;
pub mod spotify_client;
pub mod token_service;

pub use auth_service::*;
pub use spotify_client::*;
pub use token_service::*;
