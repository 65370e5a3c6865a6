//! 사용자 응답 DTO
//!
//! 엔티티 → 외부 노출 형태로의 명시적 직렬화 경계입니다.
//! 내부 `_id`는 공개 `id` 16진수 문자열로 대체되고,
//! 비밀번호 해시는 구조체에 필드 자체가 존재하지 않습니다.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::User;

/// 외부로 반환되는 사용자 표현
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            username,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            username,
            created_at,
            updated_at,
        }
    }
}

/// 사용자 생성 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_internal_id_replaced_with_public_id() {
        let oid = ObjectId::new();
        let mut user = User::new_local(
            "Alice".to_string(),
            "alice".to_string(),
            Some("$2b$10$hash".to_string()),
        );
        user.id = Some(oid);

        let response = UserResponse::from(user);

        assert_eq!(response.id, oid.to_hex());
    }

    #[test]
    fn test_password_hash_never_exposed() {
        let mut user = User::new_local(
            "Alice".to_string(),
            "alice".to_string(),
            Some("$2b$10$topsecret".to_string()),
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        // 해시 필드는 응답 구조체에 존재하지 않는다
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("topsecret"));

        // 공개 필드는 유지된다
        assert_eq!(json.get("username").unwrap(), "alice");
        assert!(json.get("id").is_some());
        assert!(json.get("_id").is_none());
    }
}
