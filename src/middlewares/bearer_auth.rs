//! Bearer 토큰 인증 미들웨어
//!
//! `Authorization: Bearer <token>` 헤더를 확인하고, 토큰을 요청 확장에 저장합니다.
//! 헤더가 없거나 형식이 잘못되면 핸들러를 호출하지 않고 401을 반환합니다.
//!
//! 토큰 자체의 유효성은 여기서 판단하지 않습니다. Spotify 토큰은 불투명하므로
//! 핸들러가 프로바이더를 호출할 때 결정됩니다.
//!
//! ```rust,ignore
//! web::scope("/auth/profile")
//!     .wrap(BearerAuth)
//!     .service(handlers::auth::profile)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::bearer_inner::BearerAuthService;

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService {
            service: Rc::new(service),
        }))
    }
}
