//! User HTTP Handlers
//!
//! 사용자 계정 CRUD 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 모든 응답은 직렬화 경계를 거친 DTO로, 비밀번호 해시를 포함하지 않습니다.

use actix_web::{web, HttpResponse, get, post, patch, delete};
use validator::Validate;
use crate::errors::errors::AppError;
use crate::domain::dto::users::request::{CreateUserRequest, UpdateUserRequest};
use crate::services::users::user_service::UserService;

#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_users() -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let users = service.list_users().await?;

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_user_by_id(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[get("/by-username/{username}")]
pub async fn get_user_by_username(
    username: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_user_by_username(&username).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[patch("/{user_id}")]
pub async fn update_user(
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let user = service.update_user(&user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.delete_user(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
