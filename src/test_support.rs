//! 테스트 더블
//!
//! MongoDB와 Spotify 없이 오케스트레이터와 핸들러를 검증하기 위한
//! 인메모리 `UserDirectory`와 스텁 `ProviderClient`입니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::{SpotifyProfile, SpotifyTokenResponse};
use crate::domain::models::token::TokenPair;
use crate::repositories::users::UserDirectory;
use crate::services::auth::spotify_client::{ProviderClient, ProviderError};

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
    pub writes: AtomicUsize,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `email`, `spotify_id` sparse unique 인덱스와 같은 규칙
    fn shares_unique_key(existing: &User, user: &User) -> bool {
        (user.email.is_some() && existing.email == user.email)
            || (user.spotify_id.is_some() && existing.spotify_id == user.spotify_id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .all()
            .into_iter()
            .find(|user| user.email.as_deref() == Some(email)))
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .all()
            .into_iter()
            .find(|user| user.spotify_id.as_deref() == Some(provider_id)))
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if users.iter().any(|existing| Self::shares_unique_key(existing, &user)) {
            return Err(AppError::ConflictError("이미 등록된 사용자입니다".to_string()));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if users.iter().any(|existing| existing.id != user.id && Self::shares_unique_key(existing, &user)) {
            return Err(AppError::ConflictError("이미 등록된 사용자입니다".to_string()));
        }

        let slot = users
            .iter_mut()
            .find(|existing| existing.id.is_some() && existing.id == user.id)
            .ok_or_else(|| AppError::NotFound("user".to_string()))?;

        *slot = user.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(user)
    }
}

pub struct StubProvider {
    misconfigured: bool,
    exchange: Mutex<Result<TokenPair, ProviderError>>,
    profile: Mutex<Result<SpotifyProfile, ProviderError>>,
    refresh: Mutex<Result<SpotifyTokenResponse, ProviderError>>,
    pub exchange_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            misconfigured: false,
            exchange: Mutex::new(Ok(
                TokenPair::new("spotify-access", "spotify-refresh").with_expiry(Some(3600))
            )),
            profile: Mutex::new(Ok(Self::profile(
                "spotify-user",
                Some("Listener"),
                Some("listener@example.com"),
            ))),
            refresh: Mutex::new(Ok(SpotifyTokenResponse {
                access_token: "refreshed-access".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: Some(3600),
                refresh_token: None,
                scope: None,
            })),
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    pub fn misconfigured(mut self) -> Self {
        self.misconfigured = true;
        self
    }

    pub fn profile(id: &str, display_name: Option<&str>, email: Option<&str>) -> SpotifyProfile {
        SpotifyProfile {
            id: id.to_string(),
            display_name: display_name.map(str::to_string),
            email: email.map(str::to_string),
            country: Some("KR".to_string()),
            images: Vec::new(),
            product: Some("premium".to_string()),
            followers: Default::default(),
        }
    }

    pub fn set_exchange(&self, result: Result<TokenPair, ProviderError>) {
        *self.exchange.lock().unwrap_or_else(PoisonError::into_inner) = result;
    }

    pub fn set_profile(&self, result: Result<SpotifyProfile, ProviderError>) {
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = result;
    }

    pub fn set_refresh(&self, result: Result<SpotifyTokenResponse, ProviderError>) {
        *self.refresh.lock().unwrap_or_else(PoisonError::into_inner) = result;
    }

    /// 네트워크 호출에 해당하는 메서드의 총 호출 횟수
    pub fn total_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
            + self.profile_calls.load(Ordering::SeqCst)
            + self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for StubProvider {
    fn authorize_url(&self, state: &str) -> Result<String, ProviderError> {
        if self.misconfigured {
            return Err(ProviderError::Misconfigured("SPOTIFY_CLIENT_ID not set".to_string()));
        }
        Ok(format!("https://accounts.spotify.test/authorize?state={}", state))
    }

    async fn exchange_code(&self, _code: &str) -> Result<TokenPair, ProviderError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.exchange.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<SpotifyTokenResponse, ProviderError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<SpotifyProfile, ProviderError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
