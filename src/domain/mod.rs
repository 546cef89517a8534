//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/   ← MongoDB 문서 (User)
//! ├── models/     ← Spotify 응답, ProviderIdentity, TokenPair, BearerToken
//! └── dto/        ← HTTP 요청/응답 본문
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::User;
pub use models::{BearerToken, ProviderIdentity, SpotifyProfile, SpotifyTokenResponse, TokenPair};
