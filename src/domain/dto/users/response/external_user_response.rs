//! 외부 아이덴티티 응답 DTO
//!
//! 외부 아이덴티티 엔티티의 직렬화 경계입니다. 내부 `_id`와
//! 소유자 참조가 16진수 문자열로 변환됩니다.

use serde::{Deserialize, Serialize};
use crate::config::ProviderName;
use crate::domain::entities::users::external_user::ExternalUser;

/// 외부로 반환되는 외부 아이덴티티 표현
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUserResponse {
    pub id: String,
    pub user_id: String,
    pub provider_user_id: String,
    pub provider_name: ProviderName,
    pub login_name: String,
    pub picture: String,
}

impl From<ExternalUser> for ExternalUserResponse {
    fn from(external: ExternalUser) -> Self {
        Self {
            id: external.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: external.user_id.to_hex(),
            provider_user_id: external.provider_user_id,
            provider_name: external.provider_name,
            login_name: external.login_name,
            picture: external.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_object_ids_converted_to_hex_strings() {
        let user_oid = ObjectId::new();
        let mut external = ExternalUser::try_new(
            &user_oid.to_hex(),
            ProviderName::GitHub,
            "gh123",
            Some("octocat".to_string()),
            None,
        )
        .unwrap();
        let external_oid = ObjectId::new();
        external.id = Some(external_oid);

        let response = ExternalUserResponse::from(external);

        assert_eq!(response.id, external_oid.to_hex());
        assert_eq!(response.user_id, user_oid.to_hex());
        assert_eq!(response.provider_user_id, "gh123");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json.get("provider_name").unwrap(), "github");
    }
}
