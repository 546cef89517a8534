//! Domain Entities
//!
//! MongoDB에 영구 저장되는 도메인 엔티티입니다.

pub mod users;
