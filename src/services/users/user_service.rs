//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 비즈니스 로직을 구현합니다.
//! 계정 등록, 조회, 부분 업데이트, 삭제, 목록 조회를 제공하며,
//! 모든 반환값은 직렬화 경계(`UserResponse`)를 거쳐 비밀번호 해시 없이
//! 공개 `id` 필드를 갖는 형태로 변환됩니다.

use std::sync::Arc;
use bcrypt::hash;
use mongodb::bson::{doc, DateTime};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
};
use crate::domain::dto::users::request::{CreateUserRequest, UpdateUserRequest};
use crate::domain::dto::users::response::{CreateUserResponse, UserResponse};
use crate::errors::errors::AppError;
use crate::utils::string_utils::validate_required_string;

/// 사용자 계정 서비스
///
/// `#[service]` 매크로를 통해 자동으로 싱글톤으로 관리되며,
/// `UserRepository`가 자동 주입됩니다.
#[service]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 사용자 계정을 생성합니다.
    ///
    /// 식별 필드(username)가 비어 있으면 `ValidationError`로 실패합니다.
    /// 비밀번호가 제공된 경우 bcrypt(cost 10)로 해싱해 저장하고,
    /// 제공되지 않은 경우 자격 증명 없이 저장합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(CreateUserResponse)` - 생성된 사용자 DTO (해시 미포함)
    /// * `Err(AppError::ValidationError)` - 사용자명 누락
    /// * `Err(AppError::ConflictError)` - 사용자명 중복 (저장 전 검사)
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let username = validate_required_string(&request.username, "username")?;

        // 비밀번호가 있는 경우에만 해싱 (환경별 bcrypt cost 사용)
        let password_hash = match request.password.as_deref() {
            Some(password) => {
                let bcrypt_cost = PasswordConfig::bcrypt_cost();

                let hash_start = std::time::Instant::now();
                let hashed = hash(password, bcrypt_cost)
                    .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
                log::debug!("Password hashing took: {:?}", hash_start.elapsed());

                Some(hashed)
            }
            None => None,
        };

        let user = User::new_local(request.name, username, password_hash);

        // 저장 (사용자명 중복은 리포지토리에서 ConflictError로 거부)
        let created_user = self.user_repo.create(user).await?;

        log::info!("사용자 '{}' 생성 완료", created_user.username);

        Ok(CreateUserResponse {
            user: UserResponse::from(created_user),
            message: "사용자가 성공적으로 생성되었습니다".to_string(),
        })
    }

    /// ID로 사용자를 조회합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 사용자 정보 DTO (민감 정보 제외)
    /// * `Err(AppError::ValidationError)` - id 누락 또는 잘못된 형식
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let id = validate_required_string(id, "id")?;

        let user = self.user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 사용자명(또는 이메일)으로 사용자를 조회합니다.
    pub async fn get_user_by_username(&self, username: &str) -> Result<UserResponse, AppError> {
        let username = validate_required_string(username, "username")?;

        let user = self.user_repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 사용자 정보를 부분 업데이트합니다.
    ///
    /// 지정된 필드만 `$set`으로 변경하고 업데이트된 레코드를 반환합니다.
    /// 사용자명 변경 시 유니크 제약을 저장 전에 다시 검사하며,
    /// 새 비밀번호는 재해싱되어 저장됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 업데이트된 사용자 DTO
    /// * `Err(AppError::ValidationError)` - id 누락 또는 변경할 필드 없음
    /// * `Err(AppError::ConflictError)` - 변경하려는 사용자명이 이미 사용 중
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn update_user(&self, id: &str, request: UpdateUserRequest) -> Result<UserResponse, AppError> {
        let id = validate_required_string(id, "id")?;

        if request.is_empty() {
            return Err(AppError::ValidationError("변경할 필드가 없습니다".to_string()));
        }

        let mut update_doc = doc! {};

        if let Some(name) = request.name {
            update_doc.insert("name", name);
        }

        if let Some(username) = request.username {
            let username = validate_required_string(&username, "username")?;

            // 사용자명 유니크 제약 재검사 (자기 자신은 허용)
            if let Some(existing) = self.user_repo.find_by_username(&username).await? {
                if existing.id_string().as_deref() != Some(id.as_str()) {
                    return Err(AppError::ConflictError(
                        format!("사용자명 '{}'은(는) 이미 사용 중입니다", username)
                    ));
                }
            }

            update_doc.insert("username", username);
        }

        if let Some(password) = request.password {
            let hashed = hash(&password, PasswordConfig::bcrypt_cost())
                .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
            update_doc.insert("password_hash", hashed);
        }

        update_doc.insert("updated_at", DateTime::now());

        let updated_user = self.user_repo
            .update(&id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!("사용자 '{}' 업데이트 완료", id);

        Ok(UserResponse::from(updated_user))
    }

    /// 사용자를 삭제합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 삭제 완료
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let id = validate_required_string(id, "id")?;

        let deleted = self.user_repo.delete(&id).await?;

        if !deleted {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("사용자 '{}' 삭제 완료", id);

        Ok(())
    }

    /// 전체 사용자 목록을 조회합니다.
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all().await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
