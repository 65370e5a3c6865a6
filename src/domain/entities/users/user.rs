//! 사용자 엔티티
//!
//! `users` 컬렉션에 저장되는 로컬 사용자 계정 문서입니다.
//! 내부 `_id` 필드는 직렬화 경계(`UserResponse`)에서 공개 `id` 문자열로
//! 변환되며, 비밀번호 해시는 응답에 절대 포함되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 로컬 사용자 계정 문서
///
/// `username`은 시스템 전체에서 유니크하며, 저장 전 리포지토리 계층에서
/// 중복 검사가 수행됩니다. 외부 프로바이더로만 가입한 사용자는 자격 증명이
/// 없으므로 `password_hash`가 `None`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 로컬 등록 사용자를 생성합니다. 비밀번호는 이미 해싱된 값이어야 합니다.
    pub fn new_local(name: String, username: String, password_hash: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// 외부 프로바이더 최초 로그인으로 프로비저닝되는 사용자를 생성합니다.
    ///
    /// 자격 증명 없이 생성되며, 비밀번호 인증은 불가능합니다.
    pub fn new_external(name: String, username: String) -> Self {
        Self::new_local(name, username, None)
    }

    /// ObjectId의 16진수 문자열 표현을 반환합니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 계정인지 확인합니다.
    pub fn has_credential(&self) -> bool {
        self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_external_has_no_credential() {
        let user = User::new_external("Alice".to_string(), "alice".to_string());

        assert!(user.id.is_none());
        assert!(!user.has_credential());
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_new_local_with_credential() {
        let user = User::new_local(
            "Alice".to_string(),
            "alice".to_string(),
            Some("$2b$10$hash".to_string()),
        );

        assert!(user.has_credential());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        // 저장 전(id 미할당) + 자격 증명 없는 사용자 직렬화 시
        // _id와 password_hash 필드 자체가 생략되어야 한다
        let user = User::new_external("Alice".to_string(), "alice".to_string());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("_id").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json.get("username").unwrap(), "alice");
    }

    #[test]
    fn test_id_string_round_trip() {
        let mut user = User::new_external("Alice".to_string(), "alice".to_string());
        assert_eq!(user.id_string(), None);

        let oid = ObjectId::new();
        user.id = Some(oid);
        assert_eq!(user.id_string(), Some(oid.to_hex()));
    }
}
