//! # Repository Layer
//!
//! MongoDB 접근을 캡슐화합니다. 서비스 계층은 구체 타입이 아니라
//! [`UserDirectory`](users::UserDirectory) trait에 의존합니다.

pub mod users;
