//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 사용자명 유니크 제약을 저장 전 검사 + 유니크 인덱스로 이중 보장

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 CRUD 연산을 담당하며, MongoDB 컬렉션과 Redis 캐시를
/// 통합하여 최적화된 데이터 액세스를 제공합니다.
///
/// ## 캐싱 전략
///
/// ### L1 Cache (Redis)
/// - **TTL**: 10분 (600초)
/// - **키 패턴**:
///   - 개별 사용자: `user:{user_id}`
///   - 사용자명 조회: `user:username:{username}`
///
/// ### L2 Storage (MongoDB)
/// - **컬렉션명**: `users`
/// - **인덱스**: username(unique), created_at(desc)
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>` 타입을 반환하며,
/// 다음과 같은 에러 상황을 처리합니다:
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 검증 오류
/// - **ConflictError**: 사용자명 중복 등 비즈니스 규칙 위반
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    ///
    /// 자동 주입되는 Redis 클라이언트입니다.
    /// 조회 성능 향상을 위한 캐싱 레이어를 제공합니다.
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// ID로 사용자 조회
    ///
    /// 가장 빈번한 조회 패턴이므로 적극적인 캐싱을 적용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:{id}` (리포지토리 매크로의 `cache_key()` 사용)
    /// - **TTL**: 600초 (10분)
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 이메일을 사용자명으로 쓰는 계정도 같은 경로로 조회됩니다.
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:username:{username}`
    /// - **TTL**: 600초 (10분)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let cache_key = format!("user:username:{}", username);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 새 사용자 생성
    ///
    /// 새로운 사용자를 데이터베이스에 저장합니다.
    /// 사용자명의 중복 여부를 삽입 전에 검증하고,
    /// 성공 시 컬렉션 캐시를 무효화합니다.
    ///
    /// # 인자
    ///
    /// * `user` - 생성할 사용자 정보 (ID는 자동 할당됨)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 비즈니스 규칙
    ///
    /// 1. **사용자명 유니크성**: 동일한 사용자명으로 두 번째 계정 생성 불가
    ///    (삽입 전 조회로 검사하고, 유니크 인덱스가 최종 방어선)
    /// 2. **ID 자동 할당**: MongoDB가 자동으로 ObjectId 생성
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인 (저장 전 데이터 액세스 계층에서 검사)
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError(
                format!("사용자명 '{}'은(는) 이미 사용 중입니다", user.username)
            ));
        }

        // DB에 저장
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError(
                        format!("사용자명 '{}'은(는) 이미 사용 중입니다", user.username)
                    )
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        // 컬렉션 캐시 무효화
        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 사용자 정보 업데이트
    ///
    /// 기존 사용자의 정보를 부분적으로 업데이트합니다.
    /// 업데이트 후 최신 사용자 정보를 반환하고 관련 캐시를 무효화합니다.
    ///
    /// # 인자
    ///
    /// * `id` - 업데이트할 사용자의 ID (ObjectId 문자열)
    /// * `update_doc` - 업데이트할 필드들을 포함한 MongoDB Document
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 업데이트된 사용자 정보
    /// * `Ok(None)` - 해당 ID의 사용자가 존재하지 않음
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 업데이트 연산
    ///
    /// - **MongoDB `$set` 연산자 사용**: 지정된 필드만 변경
    /// - **원자적 연산**: find_one_and_update로 조회와 업데이트를 동시에
    /// - **최신 데이터 반환**: ReturnDocument::After 옵션 사용
    pub async fn update(&self, id: &str, update_doc: mongodb::bson::Document) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": update_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화 (사용자명 키는 이전 값을 알 수 없으므로 패턴 삭제)
        if let Some(ref user) = updated_user {
            let _ = self.invalidate_cache(id).await;
            let _ = self.redis.del(&format!("user:username:{}", user.username)).await;
        }

        Ok(updated_user)
    }

    /// 사용자 삭제
    ///
    /// 지정된 ID의 사용자를 데이터베이스에서 영구적으로 삭제합니다.
    /// 삭제 성공 시 관련된 캐시를 무효화합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 사용자가 성공적으로 삭제됨
    /// * `Ok(false)` - 해당 ID의 사용자가 존재하지 않음 (삭제할 것이 없음)
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let result = self.collection::<User>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            // 캐시 무효화
            let _ = self.invalidate_cache(id).await;
            let _ = self.invalidate_collection_cache(None).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 전체 사용자 목록 조회
    ///
    /// 컬렉션의 모든 사용자 문서를 커서로 읽어 반환합니다.
    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection::<User>()
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자 컬렉션에 필요한 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **사용자명 유니크 인덱스**: 중복 사용자명 방지 및 조회 최적화.
    ///    저장 전 중복 검사가 놓치는 동시 삽입 경쟁의 최종 방어선입니다.
    /// 2. **생성일 인덱스**: 최근 사용자 조회 및 정렬 최적화
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// MongoDB 중복 키 에러(코드 11000) 여부를 판별합니다.
pub(crate) fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
