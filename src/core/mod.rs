//! # Core Module
//!
//! 백엔드 전역에서 공유하는 기반 기능을 제공합니다.
//!
//! ### [`registry`] - 컴포넌트 컨테이너
//! - **ServiceLocator**: 인프라 싱글톤과 컴포넌트 인스턴스 보관
//! - **ComponentRegistration**: `inventory` 기반 컴포넌트 자동 수집
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 JSON 에러 응답 변환
//!
//! ## 애플리케이션 초기화 순서
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(spotify_config);
//! ServiceLocator::initialize_all();
//!
//! let auth_service = AuthService::new(
//!     auth_config,
//!     SpotifyClient::instance(),
//!     UserRepository::instance(),
//! );
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
