//! # HTTP Handlers
//!
//! actix-web 핸들러는 요청 파싱과 검증만 담당하고,
//! 실제 로직은 `web::Data<AuthService>`로 주입된 서비스에 위임합니다.
//! 에러는 `AppError`의 `ResponseError` 구현을 통해 JSON으로 변환됩니다.

pub mod auth;
