//! # Service Layer
//!
//! 비즈니스 로직을 담당합니다. 외부 시스템(MongoDB, Spotify)은
//! trait 뒤에 두고 생성자로 주입받습니다.

pub mod auth;
