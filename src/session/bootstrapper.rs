//! 로그인 페이지 세션 부트스트래퍼
//!
//! 백엔드 콜백이 `/login?...`으로 리다이렉트한 뒤, 쿼리 파라미터나 다른 탭이 저장한
//! 토큰을 받아 세션으로 저장하고 앱 화면으로 한 번만 이동합니다.
//!
//! ```text
//! error / token_expired ─────────────▶ 에러 메시지 표시 (중단)
//! access_token + refresh_token
//!   ├─ close=true ──▶ 저장 ──▶ 100ms 후 창 닫기 (이동 없음)
//!   └─ 그 외 ───────▶ 저장 ──▶ /app/feed 이동
//! 토큰 없음 ──▶ 저장소 이벤트 구독 (없으면 500ms 폴링) ──▶ 다른 탭이 저장하면 이동
//! ```
//!
//! 쿼리 처리, 저장소 이벤트, 폴링이 겹쳐도 `processing` 플래그로 이동은 정확히 한 번만 일어납니다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use actix_web::web;
use serde::Deserialize;
use tokio::sync::{broadcast, watch};
use crate::utils::string_utils::deserialize_optional_string;
use super::token_store::{Session, StorageEvent, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY};

pub const APP_HOME_PATH: &str = "/app/feed";
pub const CLOSE_DELAY: Duration = Duration::from_millis(100);
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 로그인 페이지 쿼리 파라미터
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginPageParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub token_expired: Option<String>,
}

impl LoginPageParams {
    /// `a=1&b=2` 형식의 쿼리 문자열을 파싱합니다. 앞의 `?`는 허용합니다.
    ///
    /// 형식이 잘못된 경우 파라미터가 없는 것으로 취급합니다.
    pub fn parse(query: &str) -> Self {
        web::Query::<Self>::from_query(query.trim_start_matches('?'))
            .map(web::Query::into_inner)
            .unwrap_or_default()
    }

    pub fn should_close(&self) -> bool {
        self.close.as_deref() == Some("true")
    }

    pub fn is_token_expired(&self) -> bool {
        self.token_expired.is_some()
    }
}

/// 백엔드가 리다이렉트 URL에 싣는 에러 코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    SpotifyError,
    NoCode,
    AuthFailed,
    Other(String),
}

impl AuthErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "spotify_error" => AuthErrorCode::SpotifyError,
            "no_code" => AuthErrorCode::NoCode,
            "auth_failed" => AuthErrorCode::AuthFailed,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AuthErrorCode::SpotifyError => "Spotify가 인가 요청을 거부했습니다. 다시 시도해주세요.",
            AuthErrorCode::NoCode => "Spotify로부터 인가 코드를 받지 못했습니다. 다시 시도해주세요.",
            AuthErrorCode::AuthFailed => "Spotify 인증에 실패했습니다. 계정을 확인한 뒤 다시 시도해주세요.",
            AuthErrorCode::Other(_) => "인증 중 오류가 발생했습니다. 다시 시도해주세요.",
        }
    }
}

pub const SESSION_EXPIRED_MESSAGE: &str = "세션이 만료되었습니다. 다시 로그인해주세요.";

/// 화면 전환 추상화 (라우터, 창 제어, 에러 표시)
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);

    fn close_window(&self);

    fn show_error(&self, message: &str);
}

/// 쿼리 파라미터 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapAction {
    ShowError(String),
    ScheduleClose(Duration),
    Navigated,
    /// 처리할 토큰이 없음. 다른 탭을 기다립니다.
    Wait,
}

pub struct SessionBootstrapper {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    processing: AtomicBool,
    authenticated: AtomicBool,
    poll_interval: Duration,
}

impl SessionBootstrapper {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            processing: AtomicBool::new(false),
            authenticated: AtomicBool::new(false),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    pub fn handle_params(&self, params: &LoginPageParams) -> BootstrapAction {
        if let Some(error) = &params.error {
            let message = AuthErrorCode::parse(error).user_message();
            if let Some(details) = &params.details {
                log::error!("인증 오류: {} (상세: {})", error, details);
            } else {
                log::error!("인증 오류: {}", error);
            }
            self.navigator.show_error(message);
            return BootstrapAction::ShowError(message.to_string());
        }

        if params.is_token_expired() {
            self.navigator.show_error(SESSION_EXPIRED_MESSAGE);
            return BootstrapAction::ShowError(SESSION_EXPIRED_MESSAGE.to_string());
        }

        let (Some(access_token), Some(refresh_token)) = (&params.access_token, &params.refresh_token) else {
            return BootstrapAction::Wait;
        };
        let session = Session::new(access_token.as_str(), refresh_token.as_str(), params.user_id.clone());
        session.save(self.store.as_ref());

        if params.should_close() {
            // 팝업 창은 저장만 하고 닫힙니다. 이 탭에서는 이동이 일어나지 않도록 선점합니다.
            self.processing.store(true, Ordering::SeqCst);
            return BootstrapAction::ScheduleClose(CLOSE_DELAY);
        }

        if self.adopt(session) {
            BootstrapAction::Navigated
        } else {
            BootstrapAction::Wait
        }
    }

    /// 세션을 채택하고 앱 화면으로 이동합니다. 이미 처리 중이면 `false`.
    fn adopt(&self, session: Session) -> bool {
        if self.is_authenticated() {
            return false;
        }
        if self
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        session.save(self.store.as_ref());
        self.authenticated.store(true, Ordering::SeqCst);
        log::info!("✅ 세션 채택, {}로 이동합니다", APP_HOME_PATH);
        self.navigator.navigate(APP_HOME_PATH);
        true
    }

    fn is_idle(&self) -> bool {
        !self.processing.load(Ordering::SeqCst) && !self.is_authenticated()
    }

    /// 다른 탭이 액세스 토큰을 저장했다는 이벤트를 처리합니다.
    pub fn on_storage_event(&self, event: &StorageEvent) -> bool {
        if event.key != ACCESS_TOKEN_KEY || !self.is_idle() {
            return false;
        }
        let Some(access_token) = event.new_value.as_deref().filter(|t| !t.is_empty()) else {
            return false;
        };
        let Some(refresh_token) = self.store.get(REFRESH_TOKEN_KEY) else {
            return false;
        };

        self.adopt(Session::new(access_token, refresh_token, self.store.get(USER_ID_KEY)))
    }

    /// 저장소를 한 번 확인합니다.
    pub fn poll_once(&self) -> bool {
        if !self.is_idle() {
            return false;
        }
        match Session::load(self.store.as_ref()) {
            Some(session) => self.adopt(session),
            None => false,
        }
    }

    /// 앱 화면으로 이동한 뒤 프로필에서 얻은 이메일을 보관합니다.
    pub fn on_profile_loaded(&self, email: Option<&str>) {
        if let Some(email) = email {
            Session::remember_email(self.store.as_ref(), email);
        }
    }

    /// 쿼리 파라미터를 처리하고, 필요하면 다른 탭을 기다립니다.
    ///
    /// 이동하거나 창을 닫거나 에러를 표시했거나 `shutdown`이 신호되면 반환합니다.
    pub async fn start(&self, params: &LoginPageParams, shutdown: watch::Receiver<bool>) -> BootstrapAction {
        match self.handle_params(params) {
            BootstrapAction::ScheduleClose(delay) => {
                tokio::time::sleep(delay).await;
                self.navigator.close_window();
                BootstrapAction::ScheduleClose(delay)
            }
            BootstrapAction::Wait => {
                if self.watch(shutdown).await {
                    BootstrapAction::Navigated
                } else {
                    BootstrapAction::Wait
                }
            }
            action => action,
        }
    }

    /// 다른 탭의 토큰 저장을 기다립니다.
    ///
    /// 저장소가 이벤트를 지원하면 구독하고, 아니면 `poll_interval`마다 확인합니다.
    /// 구독을 먼저 연 뒤 저장소를 확인하므로, 그 사이에 저장된 토큰은 둘 중 한쪽에서 반드시 보입니다.
    /// 세션을 채택하면 `true`, 종료 신호나 이미 다른 경로에서 처리된 경우 `false`.
    pub async fn watch(&self, mut shutdown: watch::Receiver<bool>) -> bool {
        let subscription = self.store.subscribe();

        if self.poll_once() {
            return true;
        }

        if let Some(mut events) = subscription {
            loop {
                if !self.is_idle() {
                    return false;
                }
                tokio::select! {
                    event = events.recv() => match event {
                        Ok(event) => {
                            if self.on_storage_event(&event) {
                                return true;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            log::debug!("저장소 이벤트 {}개 누락, 저장소를 직접 확인합니다", skipped);
                            if self.poll_once() {
                                return true;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = shutdown.changed() => return false,
                }
            }
        }

        let mut interval = tokio::time::interval(self.poll_interval);
        loop {
            if !self.is_idle() {
                return false;
            }
            tokio::select! {
                _ = interval.tick() => {
                    if self.poll_once() {
                        return true;
                    }
                }
                _ = shutdown.changed() => return false,
            }
        }
    }
}
