//! # 아이덴티티 연동 서비스
//!
//! OAuth 핸드셰이크가 끝난 뒤 외부 프로바이더 아이덴티티를 로컬 사용자
//! 계정과 조정(reconcile)하는 핵심 로직입니다.
//!
//! ## 로그인 처리 흐름
//!
//! ```text
//! ProviderProfile (정규화된 프로바이더 프로필)
//!        │
//!        ▼
//! (provider_name, provider_user_id) 정규 키로 외부 아이덴티티 조회
//!        │
//!   ┌────┴─────┐
//!   ▼          ▼
//! 발견       미발견
//!   │          │
//!   ▼          ▼
//! 소유자 로드  최초 로그인 프로비저닝
//! (returning) (User 생성 → ExternalUser 생성)
//! ```
//!
//! ## 동시성
//!
//! 두 저장소 쓰기에 걸친 트랜잭션은 없습니다. 대신 외부 아이덴티티의
//! 유니크 복합 인덱스가 경쟁을 판정합니다: 동시 최초 로그인에서 패배한
//! 쪽은 `ConflictError`를 받고, 방금 만든 User를 보상 삭제한 뒤 승자의
//! 아이덴티티로 재해석합니다. 결과적으로 같은 프로바이더 아이덴티티의
//! 동시 최초 로그인은 항상 하나의 User로 수렴하며 고아 레코드가 남지
//! 않습니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::ProviderName,
    domain::entities::users::external_user::ExternalUser,
    domain::entities::users::user::User,
    repositories::external_users::external_user_repo::ExternalUserRepository,
    repositories::users::user_repo::UserRepository,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::oauth::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;

/// 사용자명 생성 시 충돌 회피 접미사의 최대 시도 횟수
const MAX_USERNAME_ATTEMPTS: u32 = 1000;

/// 외부 아이덴티티 ↔ 로컬 계정 연동 서비스
#[service]
pub struct IdentityService {
    user_repo: Arc<UserRepository>,
    external_user_repo: Arc<ExternalUserRepository>,
}

impl IdentityService {
    /// 외부 로그인을 로컬 인증 주체로 해석합니다.
    ///
    /// 정규 키로 기존 아이덴티티를 찾으면 returning user로 처리하고,
    /// 없으면 최초 로그인으로 간주해 User와 ExternalUser를 프로비저닝합니다.
    ///
    /// # 인자
    ///
    /// * `provider` - 이번 로그인에 사용된 프로바이더
    /// * `profile` - 핸드셰이크 결과로 받은 정규화된 프로필
    ///
    /// # 반환값
    ///
    /// * `Ok(AuthenticatedUser)` - 인증 주체 (로컬 사용자 + 외부 아이덴티티)
    /// * `Err(AppError::NotFound)` - 아이덴티티가 가리키는 사용자가 삭제됨
    /// * `Err(AppError::ValidationError)` - 프로필에 프로바이더 사용자 ID 없음
    pub async fn resolve_external_login(
        &self,
        provider: ProviderName,
        profile: ProviderProfile,
    ) -> Result<AuthenticatedUser, AppError> {
        let existing = self.external_user_repo
            .find_by_provider_identity(provider, &profile.provider_user_id)
            .await?;

        match existing {
            Some(identity) => {
                // Returning user: 연결된 로컬 계정 로드
                log::info!(
                    "{} returning user 로그인: provider_user_id={}",
                    provider, identity.provider_user_id
                );

                let user = self.load_owner(&identity).await?;
                Ok(AuthenticatedUser { user, identity })
            }
            None => {
                // 최초 로그인: 계정 프로비저닝
                log::info!(
                    "{} 최초 로그인 프로비저닝: provider_user_id={}",
                    provider, profile.provider_user_id
                );

                self.provision_first_login(provider, profile).await
            }
        }
    }

    /// 외부 아이덴티티가 가리키는 로컬 사용자를 로드합니다.
    ///
    /// 아이덴티티는 존재하는데 사용자가 삭제된 댕글링 참조는 조용히
    /// 빈 주체로 넘기지 않고 `NotFound`로 실패시킵니다.
    async fn load_owner(&self, identity: &ExternalUser) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(&identity.user_id_string())
            .await?
            .ok_or_else(|| {
                log::warn!(
                    "외부 아이덴티티 {}가 존재하지 않는 사용자 {}를 참조합니다",
                    identity.provider_user_id, identity.user_id_string()
                );
                AppError::NotFound("연결된 사용자를 찾을 수 없습니다".to_string())
            })
    }

    /// 최초 로그인 계정 프로비저닝
    ///
    /// User를 먼저 만들고 ExternalUser를 연결합니다. 두 번째 쓰기가
    /// 실패하면 첫 번째 쓰기를 보상 삭제해 고아 User를 남기지 않습니다.
    /// 유니크 인덱스 충돌(동시 최초 로그인 경쟁 패배)이면 승자의
    /// 아이덴티티를 다시 조회해 그 결과를 반환합니다.
    async fn provision_first_login(
        &self,
        provider: ProviderName,
        profile: ProviderProfile,
    ) -> Result<AuthenticatedUser, AppError> {
        let username = self.generate_unique_username(&profile.login_name).await?;

        // 외부 전용 계정: 자격 증명 없이 생성
        let user = User::new_external(profile.display_name.clone(), username);
        let user = self.user_repo.create(user).await?;

        let user_id = user.id_string()
            .ok_or_else(|| AppError::InternalError("생성된 사용자에 ID가 없습니다".to_string()))?;

        let identity = ExternalUser::try_new(
            &user_id,
            provider,
            &profile.provider_user_id,
            Some(profile.login_name.clone()),
            profile.picture.clone(),
        )?;

        match self.external_user_repo.create(identity).await {
            Ok(identity) => {
                log::info!(
                    "{} OAuth 2.0 가입 완료: username={}",
                    provider, user.username
                );
                Ok(AuthenticatedUser { user, identity })
            }
            Err(AppError::ConflictError(_)) => {
                // 경쟁 패배: 방금 만든 User를 보상 삭제하고 승자를 재해석
                log::warn!(
                    "{} 최초 로그인 경쟁 감지: provider_user_id={}, 보상 삭제 수행",
                    provider, profile.provider_user_id
                );
                let _ = self.user_repo.delete(&user_id).await;

                let identity = self.external_user_repo
                    .find_by_provider_identity(provider, &profile.provider_user_id)
                    .await?
                    .ok_or_else(|| AppError::InternalError(
                        "경쟁 승자의 외부 아이덴티티를 찾을 수 없습니다".to_string()
                    ))?;

                let user = self.load_owner(&identity).await?;
                Ok(AuthenticatedUser { user, identity })
            }
            Err(e) => {
                // 그 외 실패: 고아 User가 남지 않도록 보상 삭제 후 에러 전파
                let _ = self.user_repo.delete(&user_id).await;
                Err(e)
            }
        }
    }

    /// 프로바이더 로그인 이름에서 유니크한 사용자명을 생성합니다.
    ///
    /// 소문자 변환 + 공백을 언더스코어로 치환한 뒤, 충돌 시 숫자 접미사를
    /// 붙여가며 사용 가능한 이름을 찾습니다.
    async fn generate_unique_username(&self, base_name: &str) -> Result<String, AppError> {
        let base = base_name.to_lowercase().replace(' ', "_");
        let mut username = base.clone();
        let mut counter = 1;

        loop {
            match self.user_repo.find_by_username(&username).await? {
                None => return Ok(username),
                Some(_) => {
                    // 중복되면 숫자 추가
                    username = format!("{}_{}", base, counter);
                    counter += 1;

                    if counter > MAX_USERNAME_ATTEMPTS {
                        return Err(AppError::InternalError("사용자명 생성 실패".to_string()));
                    }
                }
            }
        }
    }
}
