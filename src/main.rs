//! 음악 리뷰 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 컴포넌트를 초기화합니다.
//! MongoDB 연결과 Spotify OAuth 설정을 준비한 뒤 `/auth` API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use music_review_backend::config::{AuthConfig, RateLimitConfig, ServerConfig, SpotifyOAuthConfig};
use music_review_backend::core::registry::ServiceLocator;
use music_review_backend::db::Database;
use music_review_backend::repositories::users::UserRepository;
use music_review_backend::routes::configure_all_routes;
use music_review_backend::services::auth::{AuthService, SpotifyClient};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 음악 리뷰 인증 서비스 시작중...");

    let auth_config = AuthConfig::from_env().map_err(startup_error)?;
    let spotify_config = SpotifyOAuthConfig::from_env().map_err(startup_error)?;

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await.map_err(startup_error)?;

    // ServiceLocator에 인프라 등록
    ServiceLocator::set(Arc::new(database));
    ServiceLocator::set(Arc::new(spotify_config));

    ServiceLocator::initialize_all();

    UserRepository::instance()
        .create_indexes()
        .await
        .map_err(startup_error)?;

    info!("✅ 모든 컴포넌트가 성공적으로 초기화되었습니다!");

    let auth_service = web::Data::new(AuthService::new(
        auth_config.clone(),
        SpotifyClient::instance(),
        UserRepository::instance(),
    ));

    start_http_server(auth_service, auth_config).await
}

/// 기동 단계의 에러를 로그로 남기고 `io::Error`로 변환합니다.
fn startup_error(e: impl std::fmt::Display) -> io::Error {
    error!("❌ 서비스 초기화 실패: {}", e);
    io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    auth_service: web::Data<AuthService>,
    auth_config: AuthConfig,
) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Spotify 로그인: http://{}/auth/login", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| startup_error("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors(&auth_config.frontend_origin);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))

            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            .app_data(auth_service.clone())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 origin 하나만 허용합니다. 콜백 리다이렉트와 같은 origin입니다.
fn configure_cors(frontend_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_origin)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
