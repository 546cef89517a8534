//! # Component Registry
//!
//! 인프라 싱글톤(데이터베이스 연결, 프로바이더 설정 등)과 그 위에서 생성되는
//! 컴포넌트(리포지토리, 외부 API 클라이언트)를 보관하는 타입 기반 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    └─ inventory::submit! → ComponentRegistration 수집
//!
//! 2. 런타임 초기화 (main.rs)
//!    ├─ ServiceLocator::set(Arc<Database>)            ← 인프라 직접 등록
//!    ├─ ServiceLocator::set(Arc<SpotifyOAuthConfig>)
//!    └─ ServiceLocator::initialize_all()              ← 등록된 컴포넌트 생성
//!
//! 3. 조립
//!    └─ AuthService::new(config, SpotifyClient::instance(), UserRepository::instance())
//! ```
//!
//! 오케스트레이터(`AuthService`)는 이 컨테이너를 직접 참조하지 않고
//! 생성자로 협력 객체를 주입받습니다. 테스트에서는 컨테이너 없이
//! 인메모리 구현을 넣어 사용합니다.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 컴포넌트 등록 정보
///
/// 각 컴포넌트 모듈이 `inventory::submit!`으로 제출합니다.
/// `constructor`는 싱글톤 인스턴스를 생성(또는 캐시된 인스턴스를 반환)합니다.
pub struct ComponentRegistration {
    /// 컴포넌트 이름 (로그 출력용)
    pub name: &'static str,
    /// 인스턴스 생성 함수
    pub constructor: fn() -> Arc<dyn Any + Send + Sync>,
}

inventory::collect!(ComponentRegistration);

/// 타입 기반 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 등록된 인스턴스를 가져옵니다.
    ///
    /// # Panics
    ///
    /// 해당 타입이 `set`으로 등록되지 않은 경우. 인프라 등록 순서 오류는
    /// 기동 시점에 바로 드러나야 하므로 패닉으로 처리합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        Self::try_get::<T>().unwrap_or_else(|| {
            panic!(
                "Component not found: {}. Register it with ServiceLocator::set() before use",
                std::any::type_name::<T>()
            )
        })
    }

    /// 등록된 인스턴스를 가져옵니다. 없으면 `None`.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 외부에서 생성된 인스턴스를 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 컴포넌트를 미리 생성합니다.
    ///
    /// 인프라(`Database`, 설정)는 이 호출 전에 `set`으로 등록되어 있어야 합니다.
    pub fn initialize_all() -> usize {
        print_boxed_title("🔄 INITIALIZING COMPONENTS");

        let registrations: Vec<_> = inventory::iter::<ComponentRegistration>().collect();
        let count = registrations.len();

        print_step_start(1, "Creating component instances");
        for registration in registrations {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(1, "Component instances created", count);

        print_final_summary(count);
        count
    }

    /// `std::any::type_name` 결과에서 모듈 경로를 제거합니다.
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct RegistryProbe {
        value: u32,
    }

    struct NeverRegistered;

    #[test]
    fn test_set_then_get_returns_same_instance() {
        let probe = Arc::new(RegistryProbe { value: 7 });
        ServiceLocator::set(probe.clone());

        let fetched = ServiceLocator::get::<RegistryProbe>();
        assert_eq!(fetched.value, 7);
        assert!(Arc::ptr_eq(&probe, &fetched));
    }

    #[test]
    fn test_try_get_unregistered_is_none() {
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("music_review_backend::db::Database"),
            "Database"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Database"), "Database");
    }
}
