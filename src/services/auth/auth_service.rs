//! # Auth Orchestrator
//!
//! Spotify 로그인 리다이렉트부터 콜백 처리, 토큰 교환, 프로필 조회, 사용자 upsert,
//! 토큰을 실은 프론트엔드 리다이렉트까지의 순서를 조율합니다.
//! API 스타일 작업(프로필, 비밀번호 로그인, 가입 확인, 토큰 갱신, 로그아웃, 회원가입)도 담당합니다.
//!
//! ## 의존성 주입
//!
//! 협력 객체는 생성자로 명시적으로 주입됩니다.
//!
//! ```rust,ignore
//! let auth_service = AuthService::new(
//!     AuthConfig::from_env()?,
//!     SpotifyClient::instance(),
//!     UserRepository::instance(),
//! );
//! App::new().app_data(web::Data::new(auth_service))
//! ```
//!
//! ## 콜백 리다이렉트
//!
//! | 상황 | 리다이렉트 |
//! |------|-----------|
//! | Spotify가 `error` 전달 | `/login?error=spotify_error&details=<error>` |
//! | `code` 없음 | `/login?error=no_code` |
//! | 성공 | `/login?access_token=..&refresh_token=..&user_id=..&close=true` |
//! | 교환/조회/저장 실패 | `/login?error=auth_failed&details=<최대 200자>` |

use std::sync::Arc;
use uuid::Uuid;
use crate::config::{AuthConfig, PasswordConfig};
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::tokens::RefreshResponse;
use crate::domain::dto::users::request::{CheckRegistrationRequest, OAuthCallbackQuery, RegisterRequest};
use crate::domain::dto::users::response::{LoginResponse, RegistrationMethod, RegistrationStatus};
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::bearer_token::NOT_AUTHENTICATED;
use crate::domain::models::oauth::{ProviderIdentity, SpotifyProfile};
use crate::domain::models::token::TokenPair;
use crate::repositories::users::UserDirectory;
use crate::utils::string_utils::{truncate_detail, validate_required_string};
use super::spotify_client::{ProviderClient, ProviderError};
use super::token_service::TokenService;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const LOGOUT_MESSAGE: &str = "Logged out successfully";

const TOKEN_EXPIRED_MESSAGE: &str = "액세스 토큰이 만료되었습니다. 다시 로그인해주세요.";
const REFRESH_FAILED_MESSAGE: &str = "리프레시 토큰이 유효하지 않거나 만료되었습니다. 다시 로그인해주세요.";

/// 콜백 실패 시 프론트엔드로 전달되는 에러 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackErrorCode {
    SpotifyError,
    NoCode,
    AuthFailed,
}

impl CallbackErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackErrorCode::SpotifyError => "spotify_error",
            CallbackErrorCode::NoCode => "no_code",
            CallbackErrorCode::AuthFailed => "auth_failed",
        }
    }
}

pub struct AuthService {
    config: AuthConfig,
    provider: Arc<dyn ProviderClient>,
    users: Arc<dyn UserDirectory>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        config: AuthConfig,
        provider: Arc<dyn ProviderClient>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            config,
            provider,
            users,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Spotify 인가 URL을 만듭니다.
    ///
    /// 실패는 클라이언트 설정 누락뿐입니다.
    pub fn initiate_login(&self) -> Result<String, ProviderError> {
        let state = Uuid::new_v4().to_string();
        self.provider.authorize_url(&state)
    }

    /// OAuth 콜백을 처리하고 프론트엔드 리다이렉트 URL을 반환합니다.
    ///
    /// 어떤 경우에도 실패하지 않으며, 모든 오류는 URL의 에러 코드로 표현됩니다.
    pub async fn handle_callback(&self, query: &OAuthCallbackQuery) -> String {
        if let Some(error) = &query.error {
            log::warn!("❌ Spotify 인가 오류: {}", error);
            return self.error_redirect(CallbackErrorCode::SpotifyError, Some(error));
        }

        let Some(code) = query.code.as_deref() else {
            log::warn!("❌ 인가 코드가 전달되지 않았습니다");
            return self.error_redirect(CallbackErrorCode::NoCode, None);
        };

        match self.complete_login(code).await {
            Ok((tokens, user_id)) => {
                log::info!("✅ 로그인 완료, 프론트엔드로 리다이렉트합니다");
                self.success_redirect(&tokens, &user_id)
            }
            Err(e) => {
                log::error!("❌ Spotify 콜백 처리 실패: {}", e);
                self.error_redirect(CallbackErrorCode::AuthFailed, Some(&e.to_string()))
            }
        }
    }

    async fn complete_login(&self, code: &str) -> Result<(TokenPair, String), AppError> {
        log::info!("✅ 코드 수신, 토큰 교환 중...");
        let tokens = self.provider.exchange_code(code).await?;

        log::info!("✅ 토큰 획득, 사용자 프로필 조회 중...");
        let profile = self.provider.fetch_profile(&tokens.access_token).await?;
        let identity = ProviderIdentity::try_from(profile)?;

        log::info!("✅ 프로필 조회 완료, 사용자 저장 중...");
        let user = self.upsert_provider_user(&identity).await?;

        Ok((tokens, user.id_string().unwrap_or_default()))
    }

    /// 프로바이더 사용자를 생성하거나 갱신합니다.
    ///
    /// 조회 순서는 이메일, Spotify ID입니다. 기존 사용자가 있으면 갱신하고 없으면 생성합니다.
    /// 이메일 소유자와 Spotify ID 소유자가 서로 다르면 Spotify ID 소유자를 갱신하고,
    /// 이메일은 옮기지 않습니다. 한 Spotify ID는 항상 한 사용자에게만 속합니다.
    pub async fn upsert_provider_user(&self, identity: &ProviderIdentity) -> Result<User, AppError> {
        let email_owner = match &identity.email {
            Some(email) => self.users.find_by_email(email).await?,
            None => None,
        };
        let provider_owner = self.users.find_by_provider_id(&identity.provider_id).await?;

        match (email_owner, provider_owner) {
            (Some(email_owner), Some(mut provider_owner)) if email_owner.id != provider_owner.id => {
                log::warn!(
                    "⚠️ 이메일이 다른 사용자에게 등록되어 있어 이메일은 갱신하지 않습니다: spotify_id={}",
                    identity.provider_id
                );
                let without_email = ProviderIdentity {
                    email: None,
                    ..identity.clone()
                };
                provider_owner.apply_provider_identity(&without_email);
                self.users.update(provider_owner).await
            }
            (Some(mut user), _) | (None, Some(mut user)) => {
                user.apply_provider_identity(identity);
                log::info!("사용자 갱신: spotify_id={}", identity.provider_id);
                self.users.update(user).await
            }
            (None, None) => {
                log::info!("새 Spotify 사용자 등록: spotify_id={}", identity.provider_id);
                self.users.insert(User::from_provider(identity)).await
            }
        }
    }

    fn success_redirect(&self, tokens: &TokenPair, user_id: &str) -> String {
        let mut params = vec![
            ("access_token", tokens.access_token.as_str()),
            ("refresh_token", tokens.refresh_token.as_str()),
        ];
        if !user_id.is_empty() {
            params.push(("user_id", user_id));
        }
        params.push(("close", "true"));

        self.login_redirect(&params)
    }

    fn error_redirect(&self, code: CallbackErrorCode, details: Option<&str>) -> String {
        match details {
            Some(details) => {
                let details = match code {
                    CallbackErrorCode::AuthFailed => truncate_detail(details),
                    _ => details.to_string(),
                };
                self.login_redirect(&[("error", code.as_str()), ("details", &details)])
            }
            None => self.login_redirect(&[("error", code.as_str())]),
        }
    }

    fn login_redirect(&self, params: &[(&str, &str)]) -> String {
        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.login_page(), query_string)
    }

    /// Bearer 토큰으로 Spotify 프로필을 조회합니다.
    pub async fn get_profile(&self, access_token: &str) -> Result<SpotifyProfile, AppError> {
        if access_token.trim().is_empty() {
            return Err(AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()));
        }

        self.provider
            .fetch_profile(access_token)
            .await
            .map_err(|e| match e {
                ProviderError::TokenExpired => {
                    log::info!("프로필 조회: 액세스 토큰 만료");
                    AppError::TokenExpired(TOKEN_EXPIRED_MESSAGE.to_string())
                }
                other => {
                    log::warn!("프로필 조회 실패: {}", other);
                    AppError::AuthenticationError(INVALID_TOKEN.to_string())
                }
            })
    }

    /// 서버 측 세션이 없으므로 확인 메시지만 반환합니다.
    pub fn logout(&self) -> &'static str {
        log::info!("로그아웃 요청");
        LOGOUT_MESSAGE
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 사용자 없음, 비밀번호 계정 아님, 비밀번호 불일치는 모두 같은 401 메시지로 응답합니다.
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let email = validate_required_string(email, "email")?.to_lowercase();
        if password.is_empty() {
            return Err(AppError::ValidationError("password is required".to_string()));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let is_valid = bcrypt::verify(password, password_hash)
            .context("비밀번호 검증 실패")?;
        if !is_valid {
            log::warn!("비밀번호 불일치: {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = TokenService::generate_token_pair(&user)?;
        log::info!("로컬 로그인 성공: {}", email);

        Ok(LoginResponse::new(&user, tokens))
    }

    /// 가입 여부 확인
    ///
    /// 이메일 조회가 우선이며, 로컬 토큰(`token_` 접두사)으로는 Spotify를 호출하지 않습니다.
    /// Spotify 호출 실패는 미가입으로 처리합니다.
    pub async fn check_registration(&self, request: &CheckRegistrationRequest) -> Result<RegistrationStatus, AppError> {
        if let Some(email) = &request.email {
            if let Some(user) = self.users.find_by_email(&email.to_lowercase()).await? {
                return Ok(RegistrationStatus::registered(RegistrationMethod::Email, &user));
            }
        }

        let Some(token) = request
            .spotify_token
            .as_deref()
            .filter(|token| !TokenService::is_local_token(token))
        else {
            return Ok(RegistrationStatus::not_registered());
        };

        match self.provider.fetch_profile(token).await {
            Ok(profile) => {
                if let Some(user) = self.users.find_by_provider_id(&profile.id).await? {
                    return Ok(RegistrationStatus::registered(RegistrationMethod::Spotify, &user));
                }
            }
            Err(e) => {
                log::info!("Spotify 토큰이 유효하지 않거나 만료됨: {}", e);
            }
        }

        Ok(RegistrationStatus::not_registered())
    }

    /// Spotify 리프레시 토큰으로 액세스 토큰을 갱신합니다.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, AppError> {
        if refresh_token.trim().is_empty() {
            return Err(AppError::ValidationError("Refresh token is required".to_string()));
        }

        self.provider
            .refresh(refresh_token)
            .await
            .map(RefreshResponse::from)
            .map_err(|e| {
                log::error!("❌ 토큰 갱신 실패: {}", e);
                AppError::RefreshFailed(REFRESH_FAILED_MESSAGE.to_string())
            })
    }

    /// 이메일/비밀번호 계정을 생성합니다.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let email = validate_required_string(&request.email, "email")?.to_lowercase();
        let name = validate_required_string(&request.name, "name")?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_local(&email, &name, request.country, password_hash)?;
        let created = self.users.insert(user).await?;

        log::info!("새 로컬 사용자 등록: {}", email);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryUserDirectory, StubProvider};
    use std::sync::atomic::Ordering;

    const ORIGIN: &str = "http://localhost:4200";

    fn service(provider: Arc<StubProvider>, users: Arc<InMemoryUserDirectory>) -> AuthService {
        AuthService::new(AuthConfig::new(ORIGIN), provider, users).with_bcrypt_cost(4)
    }

    fn callback(code: Option<&str>, error: Option<&str>) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: code.map(str::to_string),
            error: error.map(str::to_string),
            state: None,
        }
    }

    async fn seed_local_user(users: &InMemoryUserDirectory, email: &str, password: &str) -> User {
        let hash = bcrypt::hash(password, 4).unwrap();
        let user = User::new_local(email, "Local", None, hash).unwrap();
        users.insert(user).await.unwrap()
    }

    #[actix_web::test]
    async fn test_initiate_login_returns_provider_url() {
        let service = service(Arc::new(StubProvider::new()), Arc::new(InMemoryUserDirectory::new()));

        let url = service.initiate_login().unwrap();
        assert!(url.starts_with("https://accounts.spotify.test/authorize?state="));
    }

    #[actix_web::test]
    async fn test_initiate_login_misconfigured() {
        let provider = Arc::new(StubProvider::new().misconfigured());
        let service = service(provider, Arc::new(InMemoryUserDirectory::new()));

        assert!(matches!(service.initiate_login(), Err(ProviderError::Misconfigured(_))));
    }

    #[actix_web::test]
    async fn test_callback_provider_error_redirects_without_db_write() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(provider.clone(), users.clone());

        let url = service.handle_callback(&callback(None, Some("access_denied"))).await;

        assert_eq!(url, format!("{}/login?error=spotify_error&details=access_denied", ORIGIN));
        assert_eq!(users.writes.load(Ordering::SeqCst), 0);
        assert_eq!(provider.total_calls(), 0);
    }

    #[actix_web::test]
    async fn test_callback_without_code() {
        let service = service(Arc::new(StubProvider::new()), Arc::new(InMemoryUserDirectory::new()));

        let url = service.handle_callback(&callback(None, None)).await;
        assert_eq!(url, format!("{}/login?error=no_code", ORIGIN));
    }

    #[actix_web::test]
    async fn test_callback_creates_user_once_then_updates() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(provider.clone(), users.clone());

        let first = service.handle_callback(&callback(Some("code-1"), None)).await;
        let created = users.all();
        assert_eq!(created.len(), 1);
        let user_id = created[0].id_string().unwrap();

        assert_eq!(
            first,
            format!(
                "{}/login?access_token=spotify-access&refresh_token=spotify-refresh&user_id={}&close=true",
                ORIGIN, user_id
            )
        );

        provider.set_profile(Ok(StubProvider::profile("spotify-user", Some("Renamed"), Some("listener@example.com"))));
        service.handle_callback(&callback(Some("code-2"), None)).await;

        let after = users.all();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].name, "Renamed");
        assert_eq!(after[0].id_string().unwrap(), user_id);
    }

    #[actix_web::test]
    async fn test_callback_matches_existing_user_by_email_first() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let local = seed_local_user(&users, "listener@example.com", "password123").await;
        let service = service(provider, users.clone());

        service.handle_callback(&callback(Some("code"), None)).await;

        let all = users.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, local.id);
        assert_eq!(all[0].spotify_id.as_deref(), Some("spotify-user"));
        assert!(all[0].password_hash.is_some());
    }

    #[actix_web::test]
    async fn test_callback_keeps_spotify_id_on_its_owner_when_email_belongs_to_another_user() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(provider.clone(), users.clone());

        provider.set_profile(Ok(StubProvider::profile("sp1", Some("Listener"), None)));
        service.handle_callback(&callback(Some("code-1"), None)).await;
        let spotify_user = users.all()[0].clone();

        let local = seed_local_user(&users, "x@example.com", "password123").await;

        provider.set_profile(Ok(StubProvider::profile("sp1", Some("Renamed"), Some("x@example.com"))));
        let url = service.handle_callback(&callback(Some("code-2"), None)).await;

        assert!(url.contains("access_token=spotify-access"));
        let all = users.all();
        assert_eq!(all.len(), 2);
        let owners: Vec<_> = all.iter().filter(|u| u.spotify_id.as_deref() == Some("sp1")).collect();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, spotify_user.id);
        assert_eq!(owners[0].name, "Renamed");
        assert_eq!(owners[0].email, None);

        let local_after = all.iter().find(|u| u.id == local.id).unwrap();
        assert_eq!(local_after.spotify_id, None);
    }

    #[actix_web::test]
    async fn test_callback_failure_truncates_details() {
        let provider = Arc::new(StubProvider::new());
        provider.set_exchange(Err(ProviderError::Rejected {
            status: 400,
            body: "x".repeat(500),
        }));
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(provider, users.clone());

        let url = service.handle_callback(&callback(Some("bad"), None)).await;

        let prefix = format!("{}/login?error=auth_failed&details=", ORIGIN);
        assert!(url.starts_with(&prefix));
        let details = urlencoding::decode(&url[prefix.len()..]).unwrap().into_owned();
        assert_eq!(details.chars().count(), 200);
        assert!(details.ends_with("..."));
        assert!(users.all().is_empty());
    }

    #[actix_web::test]
    async fn test_callback_omits_empty_user_id() {
        let service = service(Arc::new(StubProvider::new()), Arc::new(InMemoryUserDirectory::new()));
        let tokens = TokenPair::new("a", "b");

        assert_eq!(
            service.success_redirect(&tokens, ""),
            format!("{}/login?access_token=a&refresh_token=b&close=true", ORIGIN)
        );
    }

    #[actix_web::test]
    async fn test_get_profile_maps_errors() {
        let provider = Arc::new(StubProvider::new());
        let service = service(provider.clone(), Arc::new(InMemoryUserDirectory::new()));

        assert!(matches!(
            service.get_profile("").await,
            Err(AppError::AuthenticationError(msg)) if msg == NOT_AUTHENTICATED
        ));

        provider.set_profile(Err(ProviderError::TokenExpired));
        assert!(matches!(service.get_profile("old").await, Err(AppError::TokenExpired(_))));

        provider.set_profile(Err(ProviderError::Rejected { status: 400, body: String::new() }));
        assert!(matches!(
            service.get_profile("bad").await,
            Err(AppError::AuthenticationError(msg)) if msg == INVALID_TOKEN
        ));
    }

    #[actix_web::test]
    async fn test_login_with_password() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let user = seed_local_user(&users, "me@example.com", "password123").await;
        let service = service(Arc::new(StubProvider::new()), users);

        let response = service.login_with_password("Me@Example.com", "password123").await.unwrap();
        let id = user.id_string().unwrap();

        assert_eq!(response.user_id, id);
        assert_eq!(response.user.email.as_deref(), Some("me@example.com"));
        assert!(response.access_token.starts_with(&format!("token_{}_", id)));
        assert!(response.refresh_token.starts_with(&format!("refresh_{}_", id)));
    }

    #[actix_web::test]
    async fn test_login_with_password_failures() {
        let users = Arc::new(InMemoryUserDirectory::new());
        seed_local_user(&users, "me@example.com", "password123").await;
        users
            .insert(User::from_provider(&ProviderIdentity {
                provider_id: "sp".to_string(),
                email: Some("spotify-only@example.com".to_string()),
                name: "Sp".to_string(),
                country: None,
            }))
            .await
            .unwrap();
        let service = service(Arc::new(StubProvider::new()), users);

        assert!(matches!(service.login_with_password("", "x").await, Err(AppError::ValidationError(_))));
        assert!(matches!(service.login_with_password("me@example.com", "").await, Err(AppError::ValidationError(_))));

        for (email, password) in [
            ("me@example.com", "wrong-password"),
            ("nobody@example.com", "password123"),
            ("spotify-only@example.com", "password123"),
        ] {
            assert!(matches!(
                service.login_with_password(email, password).await,
                Err(AppError::AuthenticationError(msg)) if msg == INVALID_CREDENTIALS
            ));
        }
    }

    #[actix_web::test]
    async fn test_check_registration_by_email_skips_provider() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        seed_local_user(&users, "me@example.com", "password123").await;
        let service = service(provider.clone(), users);

        let status = service
            .check_registration(&CheckRegistrationRequest {
                email: Some("me@example.com".to_string()),
                spotify_token: Some("spotify-access".to_string()),
            })
            .await
            .unwrap();

        assert!(status.registered);
        assert_eq!(status.method, Some(RegistrationMethod::Email));
        assert_eq!(provider.total_calls(), 0);
    }

    #[actix_web::test]
    async fn test_check_registration_local_token_never_calls_provider() {
        let provider = Arc::new(StubProvider::new());
        let service = service(provider.clone(), Arc::new(InMemoryUserDirectory::new()));

        let status = service
            .check_registration(&CheckRegistrationRequest {
                email: None,
                spotify_token: Some("token_abc".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(status, RegistrationStatus::not_registered());
        assert_eq!(provider.total_calls(), 0);
    }

    #[actix_web::test]
    async fn test_check_registration_by_spotify_token() {
        let provider = Arc::new(StubProvider::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(provider.clone(), users);
        service.handle_callback(&callback(Some("code"), None)).await;

        let status = service
            .check_registration(&CheckRegistrationRequest {
                email: Some("unknown@example.com".to_string()),
                spotify_token: Some("spotify-access".to_string()),
            })
            .await
            .unwrap();

        assert!(status.registered);
        assert_eq!(status.method, Some(RegistrationMethod::Spotify));
        assert_eq!(status.user.unwrap().spotify_id.as_deref(), Some("spotify-user"));
    }

    #[actix_web::test]
    async fn test_check_registration_swallows_provider_failure() {
        let provider = Arc::new(StubProvider::new());
        provider.set_profile(Err(ProviderError::TokenExpired));
        let service = service(provider.clone(), Arc::new(InMemoryUserDirectory::new()));

        let status = service
            .check_registration(&CheckRegistrationRequest {
                email: None,
                spotify_token: Some("expired".to_string()),
            })
            .await
            .unwrap();

        assert!(!status.registered);
        assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_refresh_token() {
        let provider = Arc::new(StubProvider::new());
        let service = service(provider.clone(), Arc::new(InMemoryUserDirectory::new()));

        assert!(matches!(service.refresh_token(" ").await, Err(AppError::ValidationError(_))));

        let refreshed = service.refresh_token("spotify-refresh").await.unwrap();
        assert_eq!(refreshed.access_token, "refreshed-access");
        assert_eq!(refreshed.token_type, "Bearer");
        assert_eq!(refreshed.expires_in, Some(3600));

        provider.set_refresh(Err(ProviderError::Rejected { status: 400, body: "invalid_grant".to_string() }));
        assert!(matches!(service.refresh_token("revoked").await, Err(AppError::RefreshFailed(_))));
    }

    #[actix_web::test]
    async fn test_register_then_login() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = service(Arc::new(StubProvider::new()), users.clone());
        let request = RegisterRequest {
            email: "New@Example.com".to_string(),
            password: "password123".to_string(),
            name: "New".to_string(),
            country: Some("KR".to_string()),
        };

        let created = service.register(request.clone()).await.unwrap();
        assert_eq!(created.email.as_deref(), Some("new@example.com"));
        assert_ne!(created.password_hash.as_deref(), Some("password123"));

        assert!(matches!(service.register(request).await, Err(AppError::ConflictError(_))));
        assert!(service.login_with_password("new@example.com", "password123").await.is_ok());
    }

    #[test]
    fn test_logout_message() {
        let service = service(Arc::new(StubProvider::new()), Arc::new(InMemoryUserDirectory::new()));
        assert_eq!(service.logout(), "Logged out successfully");
    }
}
