//! # Client Session Library
//!
//! 프론트엔드가 내장하는 세션 부트스트랩 로직입니다.
//!
//! - [`token_store`] - `localStorage`에 해당하는 토큰 저장소와 변경 이벤트
//! - [`bootstrapper`] - 로그인 페이지 쿼리/다른 탭의 토큰을 세션으로 채택하는 상태 기계
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryTokenStore::new());
//! let bootstrapper = SessionBootstrapper::new(store, navigator);
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! bootstrapper.start(&LoginPageParams::parse(query), shutdown_rx).await;
//! ```

pub mod token_store;
pub mod bootstrapper;

pub use token_store::{MemoryTokenStore, Session, StorageEvent, TokenStore};
pub use bootstrapper::{AuthErrorCode, BootstrapAction, LoginPageParams, Navigator, SessionBootstrapper};
