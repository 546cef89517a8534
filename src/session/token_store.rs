//! 클라이언트 측 토큰 저장소
//!
//! 브라우저의 `localStorage`에 해당하는 키/값 저장소 추상화입니다.
//! 같은 저장소를 공유하는 다른 탭은 [`StorageEvent`] 구독으로 변경을 전달받습니다.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const REFRESH_TOKEN_KEY: &str = "spotify_refresh_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_EMAIL_KEY: &str = "user_email";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 저장소 변경 알림. 삭제된 경우 `new_value`는 `None`입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEvent {
    pub key: String,
    pub new_value: Option<String>,
}

pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// 변경 이벤트 구독. 이벤트를 지원하지 않는 저장소는 `None`을 반환하며,
    /// 이 경우 호출 측은 주기적으로 값을 확인해야 합니다.
    fn subscribe(&self) -> Option<broadcast::Receiver<StorageEvent>>;
}

/// 프로세스 내 공유 저장소
///
/// `clone()`한 핸들끼리 같은 데이터를 봅니다. 탭 여러 개가 같은 origin의
/// `localStorage`를 공유하는 상황을 그대로 표현합니다.
#[derive(Clone)]
pub struct MemoryTokenStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    events: Option<broadcast::Sender<StorageEvent>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            events: Some(events),
        }
    }

    /// 변경 이벤트를 발행하지 않는 저장소
    pub fn without_events() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            events: None,
        }
    }

    fn publish(&self, key: &str, new_value: Option<String>) {
        if let Some(events) = &self.events {
            // 구독자가 없으면 send가 실패하지만 무시해도 됩니다.
            let _ = events.send(StorageEvent {
                key: key.to_string(),
                new_value,
            });
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.publish(key, Some(value.to_string()));
    }

    fn remove(&self, key: &str) {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed.is_some() {
            self.publish(key, None);
        }
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StorageEvent>> {
        self.events.as_ref().map(broadcast::Sender::subscribe)
    }
}

/// 클라이언트가 보관하는 세션
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            user_id: user_id.filter(|id| !id.is_empty()),
        }
    }

    /// 저장소에서 세션을 읽습니다. 두 토큰이 모두 있어야 세션으로 인정합니다.
    pub fn load(store: &dyn TokenStore) -> Option<Self> {
        let access_token = store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let refresh_token = store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())?;

        Some(Self::new(access_token, refresh_token, store.get(USER_ID_KEY)))
    }

    /// 리프레시 토큰과 사용자 ID를 먼저 쓰고 액세스 토큰을 마지막에 씁니다.
    ///
    /// 다른 탭은 액세스 토큰 변경 이벤트를 받은 시점에 나머지 값을 읽습니다.
    pub fn save(&self, store: &dyn TokenStore) {
        store.set(REFRESH_TOKEN_KEY, &self.refresh_token);
        if let Some(user_id) = &self.user_id {
            store.set(USER_ID_KEY, user_id);
        }
        store.set(ACCESS_TOKEN_KEY, &self.access_token);
    }

    /// 명시적 로그아웃 또는 토큰 만료 감지 시 세션을 파기합니다.
    pub fn clear(store: &dyn TokenStore) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY, USER_EMAIL_KEY] {
            store.remove(key);
        }
    }

    pub fn remember_email(store: &dyn TokenStore, email: &str) {
        if !email.trim().is_empty() {
            store.set(USER_EMAIL_KEY, email.trim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_session() {
        let store = MemoryTokenStore::new();
        Session::new("A", "B", Some("user-1".to_string())).save(&store);

        let session = Session::load(&store).unwrap();
        assert_eq!(session.access_token, "A");
        assert_eq!(session.refresh_token, "B");
        assert_eq!(session.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_load_requires_both_tokens() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "A");

        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let store = MemoryTokenStore::new();
        Session::new("A", "B", Some("user-1".to_string())).save(&store);
        Session::remember_email(&store, "me@example.com");

        Session::clear(&store);

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY, USER_EMAIL_KEY] {
            assert!(store.get(key).is_none());
        }
    }

    #[test]
    fn test_clones_share_entries_and_events() {
        let tab_a = MemoryTokenStore::new();
        let tab_b = tab_a.clone();
        let mut events = tab_b.subscribe().unwrap();

        Session::new("A", "B", None).save(&tab_a);

        assert_eq!(tab_b.get(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
        assert_eq!(events.try_recv().unwrap().key, REFRESH_TOKEN_KEY);
        let last = events.try_recv().unwrap();
        assert_eq!(last.key, ACCESS_TOKEN_KEY);
        assert_eq!(last.new_value.as_deref(), Some("A"));
    }

    #[test]
    fn test_store_without_events_has_no_channel() {
        assert!(MemoryTokenStore::without_events().subscribe().is_none());
    }
}
