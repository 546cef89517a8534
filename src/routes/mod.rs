//! # Route Configuration
//!
//! ```text
//! /health                    헬스 체크
//! /auth/profile              BearerAuth 적용
//! /auth/{login,callback,logout,login-password,check-registration,refresh,register}
//! ```

use crate::handlers;
use crate::middlewares::BearerAuth;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    // `/auth` 스코프보다 먼저 등록해야 합니다.
    cfg.service(
        web::scope("/auth/profile")
            .wrap(BearerAuth)
            .service(handlers::auth::profile)
    );

    cfg.service(
        web::scope("/auth")
            // Spotify OAuth
            .service(handlers::auth::login)
            .service(handlers::auth::callback)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            // 이메일/비밀번호
            .service(handlers::auth::login_password)
            .service(handlers::auth::register)
            .service(handlers::auth::check_registration)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "oauth_provider": "Spotify"
        }
    }))
}
