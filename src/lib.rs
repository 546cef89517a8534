//! 음악 리뷰 서비스 인증 백엔드
//!
//! Spotify OAuth 2.0 로그인과 이메일/비밀번호 로그인을 제공하는 Rust 백엔드와,
//! 로그인 결과를 클라이언트 세션으로 옮겨 담는 세션 부트스트래퍼를 함께 제공합니다.
//!
//! # Features
//!
//! - **Spotify OAuth**: 인가 코드 교환, 사용자 upsert, 프론트엔드로 토큰 전달
//! - **로컬 계정**: bcrypt 기반 가입 및 비밀번호 로그인
//! - **토큰 갱신**: Spotify 리프레시 토큰으로 액세스 토큰 재발급
//! - **세션 부트스트랩**: 팝업 로그인 완료를 여러 탭에 전파
//! - **MongoDB**: 사용자 데이터 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /auth/*, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 리다이렉트/JSON 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   AuthService   │ ← 인증 오케스트레이션
//! └─────────────────┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────────┐
//! │Spotify │ │UserDirectory │ ← 프로바이더 / 사용자 저장소
//! └────────┘ └──────────────┘
//!                  │
//!                  ▼
//!            ┌──────────┐
//!            │ MongoDB  │
//!            └──────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use music_review_backend::config::AuthConfig;
//! use music_review_backend::repositories::users::UserRepository;
//! use music_review_backend::services::auth::{AuthService, SpotifyClient};
//!
//! let auth = AuthService::new(
//!     AuthConfig::from_env()?,
//!     SpotifyClient::instance(),
//!     UserRepository::instance(),
//! );
//! let login_url = auth.initiate_login()?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod session;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
mod test_support;
