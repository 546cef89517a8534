//! 사용자 저장소
//!
//! [`UserDirectory`]는 오케스트레이터가 의존하는 추상화이고,
//! [`UserRepository`]는 MongoDB `users` 컬렉션 위의 운영 구현입니다.
//!
//! 조회 우선순위(이메일 → Spotify ID)와 upsert 정책은 서비스 계층에서 결정하며,
//! 저장소는 단순 조회/삽입/교체만 제공합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use once_cell::sync::OnceCell;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{ComponentRegistration, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::users::user::User;

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 레코드 조회/저장 추상화
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_provider_id(&self, provider_id: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 ID가 채워진 사용자를 반환합니다.
    ///
    /// 유니크 인덱스 위반은 `ConflictError`입니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 기존 사용자 문서를 교체합니다. `user.id`가 있어야 합니다.
    async fn update(&self, user: User) -> AppResult<User>;
}

pub struct UserRepository {
    collection: Collection<User>,
}

static USER_REPOSITORY_INSTANCE: OnceCell<Arc<UserRepository>> = OnceCell::new();

impl UserRepository {
    /// 싱글톤 인스턴스를 가져옵니다.
    ///
    /// `Database`가 `ServiceLocator`에 먼저 등록되어 있어야 합니다.
    pub fn instance() -> Arc<Self> {
        USER_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(&ServiceLocator::get::<Database>())))
            .clone()
    }

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(USERS_COLLECTION),
        }
    }

    /// `email`, `spotify_id`에 sparse unique 인덱스를 생성합니다.
    ///
    /// 두 필드 모두 선택적이므로 값이 없는 문서는 인덱스에서 제외됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let spotify_id_index = IndexModel::builder()
            .keys(doc! { "spotify_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("spotify_id_unique".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, spotify_id_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }

    fn map_write_error(error: mongodb::error::Error) -> AppError {
        if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *error.kind {
            if write_error.code == DUPLICATE_KEY_CODE {
                return AppError::ConflictError("이미 등록된 사용자입니다".to_string());
            }
        }
        AppError::DatabaseError(error.to_string())
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "spotify_id": provider_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(Self::map_write_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("inserted_id is not an ObjectId".to_string())
        })?;
        user.id = Some(id);

        log::debug!("사용자 생성: {}", id.to_hex());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자는 갱신할 수 없습니다".to_string()))?;

        let result = self.collection
            .replace_one(doc! { "_id": id }, &user)
            .await
            .map_err(Self::map_write_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("사용자 {}", id.to_hex())));
        }

        Ok(user)
    }
}

fn user_repository_constructor() -> Arc<dyn std::any::Any + Send + Sync> {
    UserRepository::instance()
}

inventory::submit! {
    ComponentRegistration {
        name: "user_repository",
        constructor: user_repository_constructor,
    }
}
