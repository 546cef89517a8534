//! # Authentication HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/auth/login` | Spotify 인가 페이지로 302 |
//! | `GET` | `/auth/callback` | 코드 교환 후 프론트엔드 `/login`으로 302 |
//! | `GET` | `/auth/profile` | Bearer 토큰으로 Spotify 프로필 조회 |
//! | `POST` | `/auth/logout` | 로그아웃 확인 메시지 |
//! | `POST` | `/auth/login-password` | 이메일/비밀번호 로그인 |
//! | `POST` | `/auth/check-registration` | 가입 여부 확인 |
//! | `POST` | `/auth/refresh` | Spotify 액세스 토큰 갱신 |
//! | `POST` | `/auth/register` | 이메일/비밀번호 계정 생성 |
//!
//! 브라우저가 직접 방문하는 `/auth/login`, `/auth/callback`은 리다이렉트로 응답하고,
//! 나머지는 JSON으로 응답합니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse, http::header};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::tokens::RefreshTokenRequest;
use crate::domain::dto::users::request::{
    CheckRegistrationRequest, OAuthCallbackQuery, PasswordLoginRequest, RegisterRequest,
};
use crate::domain::dto::users::response::RegisterResponse;
use crate::domain::models::auth::BearerToken;
use crate::services::auth::AuthService;

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Spotify 로그인 시작
///
/// # Endpoint
/// `GET /auth/login`
///
/// 클라이언트 설정이 누락된 경우 `500 {"error": "Failed to initiate login", "details": ...}`
#[get("/login")]
pub async fn login(auth: web::Data<AuthService>) -> HttpResponse {
    log::info!("🔐 Spotify 로그인 시작...");

    match auth.initiate_login() {
        Ok(url) => {
            log::info!("✅ Spotify 인가 URL 생성, 리다이렉트합니다");
            redirect(url)
        }
        Err(e) => {
            log::error!("❌ Spotify 로그인 시작 실패: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to initiate login",
                "details": e.to_string(),
            }))
        }
    }
}

/// Spotify OAuth 콜백
///
/// # Endpoint
/// `GET /auth/callback?code={code}` 또는 `?error={error}`
///
/// 성공, 실패 모두 프론트엔드 로그인 페이지로 302 리다이렉트합니다.
/// 쿼리를 파싱할 수 없으면 `code`가 없는 것으로 보고 `no_code`로 리다이렉트합니다.
#[get("/callback")]
pub async fn callback(auth: web::Data<AuthService>, req: HttpRequest) -> HttpResponse {
    let query = web::Query::<OAuthCallbackQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|e| {
            log::warn!("콜백 쿼리 파싱 실패: {}", e);
            OAuthCallbackQuery::default()
        });

    redirect(auth.handle_callback(&query).await)
}

/// Spotify 프로필 조회
///
/// # Endpoint
/// `GET /auth/profile`
///
/// `BearerAuth` 미들웨어 뒤에 마운트됩니다.
#[get("")]
pub async fn profile(
    auth: web::Data<AuthService>,
    token: BearerToken,
) -> Result<HttpResponse, AppError> {
    let profile = auth.get_profile(token.as_str()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout(auth: web::Data<AuthService>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": auth.logout() }))
}

/// 이메일/비밀번호 로그인
///
/// # Endpoint
/// `POST /auth/login-password`
///
/// # 응답
/// ```json
/// {
///   "access_token": "token_<id>_<millis>",
///   "refresh_token": "refresh_<id>_<millis>",
///   "user_id": "<id>",
///   "user": { "id": "<id>", "email": "...", "name": "...", "spotify_id": null }
/// }
/// ```
#[post("/login-password")]
pub async fn login_password(
    auth: web::Data<AuthService>,
    payload: web::Json<PasswordLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth
        .login_with_password(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 가입 여부 확인
///
/// # Endpoint
/// `POST /auth/check-registration`
#[post("/check-registration")]
pub async fn check_registration(
    auth: web::Data<AuthService>,
    payload: web::Json<CheckRegistrationRequest>,
) -> Result<HttpResponse, AppError> {
    let status = auth.check_registration(&payload).await?;
    Ok(HttpResponse::Ok().json(status))
}

/// Spotify 액세스 토큰 갱신
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    auth: web::Data<AuthService>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth.refresh_token(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 이메일/비밀번호 계정 생성
///
/// # Endpoint
/// `POST /auth/register`
///
/// 성공 시 201, 이메일 중복 시 409
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = auth.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse::new(&user)))
}
