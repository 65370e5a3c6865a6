//! # 외부 아이덴티티 리포지토리 구현
//!
//! 외부 프로바이더 아이덴티티 엔티티의 데이터 액세스 계층입니다.
//! 정규 조회 키는 `(provider_name, provider_user_id)`이며, 이 키의
//! 유니크 복합 인덱스가 동시 최초 로그인 경쟁에서 중복 생성을 차단합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    config::ProviderName,
    core::registry::Repository,
    db::Database,
    domain::entities::users::external_user::ExternalUser,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::is_duplicate_key_error;
use crate::utils::string_utils::validate_required_string;

/// 외부 아이덴티티 데이터 액세스 리포지토리
///
/// ## 조회 키
///
/// - **정규 키**: `(provider_name, provider_user_id)`. 로그인 콜백과
///   세션 역직렬화가 모두 이 키를 사용합니다 (유니크 복합 인덱스).
/// - **보조 키**: `(user_id, provider_name)`. 특정 사용자의 프로바이더
///   연동 여부 조회용.
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식, 누락된 인자
/// - **ConflictError**: 동일 프로바이더 아이덴티티의 중복 삽입
#[repository(name = "externaluser", collection = "external_users")]
pub struct ExternalUserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl ExternalUserRepository {
    /// ID로 외부 아이덴티티 조회
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(ExternalUser))` - 아이덴티티를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 아이덴티티가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ExternalUser>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<ExternalUser>(&cache_key).await {
            return Ok(Some(cached));
        }

        let external = self.collection::<ExternalUser>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref external) = external {
            let _ = self.redis
                .set_with_expiry(&cache_key, external, 600)
                .await;
        }

        Ok(external)
    }

    /// 정규 키로 외부 아이덴티티 조회
    ///
    /// 로그인 콜백(returning user 판별)과 세션 역직렬화가 사용하는
    /// 기본 조회 경로입니다.
    ///
    /// # 인자
    ///
    /// * `provider` - 외부 프로바이더 식별자
    /// * `provider_user_id` - 프로바이더가 부여한 사용자 ID
    pub async fn find_by_provider_identity(
        &self,
        provider: ProviderName,
        provider_user_id: &str,
    ) -> Result<Option<ExternalUser>, AppError> {
        let provider_user_id = validate_required_string(provider_user_id, "provider_user_id")?;

        self.collection::<ExternalUser>()
            .find_one(doc! {
                "provider_name": provider.as_str(),
                "provider_user_id": provider_user_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 + 프로바이더 조합으로 외부 아이덴티티 조회
    ///
    /// 특정 사용자가 특정 프로바이더와 연동되어 있는지 확인하는 보조
    /// 조회입니다.
    ///
    /// # 인자
    ///
    /// * `user_id` - 소유 사용자의 ObjectId 16진수 문자열
    /// * `provider` - 외부 프로바이더 식별자
    pub async fn find_by_user_and_provider(
        &self,
        user_id: &str,
        provider: ProviderName,
    ) -> Result<Option<ExternalUser>, AppError> {
        let user_id = validate_required_string(user_id, "user_id")?;
        let object_id = ObjectId::parse_str(&user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 user_id 형식입니다".to_string()))?;

        self.collection::<ExternalUser>()
            .find_one(doc! {
                "user_id": object_id,
                "provider_name": provider.as_str(),
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 외부 아이덴티티 생성
    ///
    /// 필수 필드 검증은 `ExternalUser::try_new`에서 이미 끝난 상태입니다.
    /// 동일한 `(provider_name, provider_user_id)` 문서가 이미 존재하면
    /// 유니크 인덱스 위반이 `ConflictError`로 변환됩니다. 호출 측
    /// (아이덴티티 연동)은 이를 최초 로그인 경쟁 패배로 해석합니다.
    pub async fn create(&self, mut external: ExternalUser) -> Result<ExternalUser, AppError> {
        let result = self.collection::<ExternalUser>()
            .insert_one(&external)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError(format!(
                        "{} 아이덴티티 '{}'은(는) 이미 등록되어 있습니다",
                        external.provider_name, external.provider_user_id
                    ))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        external.id = result.inserted_id.as_object_id();

        Ok(external)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **정규 키 유니크 복합 인덱스** `(provider_name, provider_user_id)`
    ///    : 동시 최초 로그인이 같은 프로바이더 아이덴티티를 두 번 등록하는
    ///    것을 저장소 수준에서 차단합니다.
    /// 2. **소유자 조회 인덱스** `(user_id, provider_name)`
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<ExternalUser>();

        // 정규 키 유니크 복합 인덱스
        let identity_index = IndexModel::builder()
            .keys(doc! { "provider_name": 1, "provider_user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_identity_unique".to_string())
                .build())
            .build();

        // 소유자 조회 인덱스
        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "provider_name": 1 })
            .options(IndexOptions::builder()
                .name("owner_provider".to_string())
                .build())
            .build();

        collection
            .create_indexes([identity_index, owner_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
