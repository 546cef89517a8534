//! # OAuth Domain Models
//!
//! Spotify OAuth 2.0 Authorization Code 플로우에서 주고받는 데이터 모델입니다.
//!
//! ```text
//! GET /authorize ──▶ code ──▶ POST /api/token ──▶ SpotifyTokenResponse
//!                                                    │
//!                              GET /v1/me ◀──────────┘
//!                                  │
//!                           SpotifyProfile ──TryFrom──▶ ProviderIdentity ──▶ User
//! ```

pub mod spotify;
pub mod provider_identity;

pub use spotify::{SpotifyFollowers, SpotifyImage, SpotifyProfile, SpotifyTokenResponse};
pub use provider_identity::ProviderIdentity;
