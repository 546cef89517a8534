//! Bearer 토큰 추출기
//!
//! [`BearerAuth`](crate::middlewares::BearerAuth) 미들웨어가 `Authorization` 헤더에서
//! 추출한 토큰을 요청 확장(extensions)에 저장하고, 핸들러는 이 타입을 인자로 받아 사용합니다.
//!
//! ```rust,ignore
//! #[get("")]
//! pub async fn profile(token: BearerToken, auth: web::Data<AuthService>) -> Result<HttpResponse, AppError> {
//!     let profile = auth.get_profile(token.as_str()).await?;
//!     Ok(HttpResponse::Ok().json(profile))
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use crate::core::errors::AppError;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// 검증되지 않은 원본 Bearer 토큰
///
/// 토큰의 유효성은 프로바이더 호출 시점에 판단됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<BearerToken>() {
            Some(token) => ready(Ok(token.clone())),
            None => ready(Err(AppError::AuthenticationError(NOT_AUTHENTICATED.to_string()))),
        }
    }
}
