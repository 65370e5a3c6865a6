//! 외부 아이덴티티 엔티티
//!
//! `external_users` 컬렉션에 저장되는 외부 프로바이더 아이덴티티 문서입니다.
//! 로컬 사용자(User) 한 명에 여러 프로바이더 아이덴티티가 연결될 수 있으며,
//! `(provider_name, provider_user_id)` 쌍이 정규 조회 키입니다.
//! 이 키의 유니크 인덱스는 기동 시
//! `ExternalUserRepository::create_indexes`가 생성합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::ProviderName;
use crate::errors::errors::AppError;
use crate::utils::string_utils::{clean_optional_string, validate_required_string};

/// 외부 프로바이더 아이덴티티 문서
///
/// 최초 OAuth 콜백 성공 시 생성되고, 이후 로그인에서는 소유 사용자를
/// 해석하는 데 읽히기만 합니다. 현재 범위에서 제자리 업데이트는 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유 사용자에 대한 참조 (`users._id`)
    pub user_id: ObjectId,
    pub provider_user_id: String,
    pub provider_name: ProviderName,
    pub login_name: String,
    pub picture: String,
    pub created_at: DateTime,
}

impl ExternalUser {
    /// 필수 필드를 검증하며 외부 아이덴티티를 생성합니다.
    ///
    /// `user_id`, `provider_user_id`가 비어 있으면 `ValidationError`로
    /// 실패합니다. 프로바이더 이름은 타입으로 강제되므로 누락될 수 없습니다.
    /// `login_name` / `picture`는 없으면 빈 문자열로 저장됩니다.
    ///
    /// # 인자
    ///
    /// * `user_id` - 소유 사용자의 ObjectId 16진수 문자열
    /// * `provider_name` - 외부 프로바이더 식별자
    /// * `provider_user_id` - 프로바이더가 부여한 사용자 ID
    /// * `login_name` - 프로바이더 로그인 이름 (선택)
    /// * `picture` - 프로필 이미지 URL (선택)
    pub fn try_new(
        user_id: &str,
        provider_name: ProviderName,
        provider_user_id: &str,
        login_name: Option<String>,
        picture: Option<String>,
    ) -> Result<Self, AppError> {
        let user_id = validate_required_string(user_id, "user_id")?;
        let provider_user_id = validate_required_string(provider_user_id, "provider_user_id")?;

        let user_id = ObjectId::parse_str(&user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 user_id 형식입니다".to_string()))?;

        Ok(Self {
            id: None,
            user_id,
            provider_user_id,
            provider_name,
            login_name: clean_optional_string(login_name).unwrap_or_default(),
            picture: clean_optional_string(picture).unwrap_or_default(),
            created_at: DateTime::now(),
        })
    }

    /// ObjectId의 16진수 문자열 표현을 반환합니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 소유 사용자 ID의 16진수 문자열 표현을 반환합니다.
    pub fn user_id_string(&self) -> String {
        self.user_id.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user_id() -> String {
        ObjectId::new().to_hex()
    }

    #[test]
    fn test_try_new_with_all_fields() {
        let external = ExternalUser::try_new(
            &valid_user_id(),
            ProviderName::GitHub,
            "gh123",
            Some("octocat".to_string()),
            Some("https://example.com/a.png".to_string()),
        )
        .unwrap();

        assert_eq!(external.provider_user_id, "gh123");
        assert_eq!(external.provider_name, ProviderName::GitHub);
        assert_eq!(external.login_name, "octocat");
        assert_eq!(external.picture, "https://example.com/a.png");
    }

    #[test]
    fn test_try_new_defaults_optional_fields_to_empty() {
        let external =
            ExternalUser::try_new(&valid_user_id(), ProviderName::Google, "g456", None, None)
                .unwrap();

        assert_eq!(external.login_name, "");
        assert_eq!(external.picture, "");
    }

    #[test]
    fn test_try_new_fails_without_user_id() {
        let result = ExternalUser::try_new("", ProviderName::GitHub, "gh123", None, None);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_try_new_fails_without_provider_user_id() {
        let result =
            ExternalUser::try_new(&valid_user_id(), ProviderName::GitHub, "   ", None, None);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_try_new_fails_on_malformed_user_id() {
        let result =
            ExternalUser::try_new("not-an-object-id", ProviderName::GitHub, "gh123", None, None);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_provider_name_serializes_as_lowercase_string() {
        let external =
            ExternalUser::try_new(&valid_user_id(), ProviderName::GitHub, "gh123", None, None)
                .unwrap();
        let json = serde_json::to_value(&external).unwrap();

        assert_eq!(json.get("provider_name").unwrap(), "github");
    }
}
