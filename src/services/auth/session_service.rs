//! # 세션 직렬화 서비스
//!
//! 인증 주체를 세션에 저장 가능한 영속 식별자로 줄이고(serialize),
//! 이후 요청에서 식별자를 다시 완전한 주체로 복원(deserialize)합니다.
//!
//! ## 토큰 형식
//!
//! 직렬화된 주체는 `"{provider}:{provider_user_id}"` 형태입니다.
//! 프로바이더 이름을 함께 담아 역직렬화가 아이덴티티 연동과 동일한
//! 정규 키 `(provider_name, provider_user_id)`로 조회하도록 합니다.
//! 식별 성분은 여전히 프로바이더 사용자 ID입니다.
//!
//! ## 에러 규약
//!
//! - 형식이 잘못된 토큰: `ValidationError` (요청 파이프라인 실패)
//! - 저장소 오류: 그대로 전파 (요청 파이프라인 실패)
//! - 알 수 없는 아이덴티티: `Ok(None)` (빈 주체)

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::ProviderName,
    repositories::external_users::external_user_repo::ExternalUserRepository,
    repositories::users::user_repo::UserRepository,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;

/// 세션 토큰의 프로바이더/ID 구분자
const TOKEN_SEPARATOR: char = ':';

/// 인증 주체를 세션 토큰으로 인코딩합니다.
pub fn encode_principal(provider: ProviderName, provider_user_id: &str) -> String {
    format!("{}{}{}", provider.as_str(), TOKEN_SEPARATOR, provider_user_id)
}

/// 세션 토큰을 `(프로바이더, 프로바이더 사용자 ID)`로 파싱합니다.
///
/// 형식이 잘못된 토큰은 `ValidationError`로 실패합니다.
pub fn parse_principal(token: &str) -> Result<(ProviderName, String), AppError> {
    let (provider, provider_user_id) = token
        .split_once(TOKEN_SEPARATOR)
        .ok_or_else(|| AppError::ValidationError("유효하지 않은 세션 토큰 형식입니다".to_string()))?;

    if provider_user_id.is_empty() {
        return Err(AppError::ValidationError("세션 토큰에 사용자 식별자가 없습니다".to_string()));
    }

    let provider = ProviderName::from_str(provider)
        .map_err(|_| AppError::ValidationError("세션 토큰의 프로바이더를 알 수 없습니다".to_string()))?;

    Ok((provider, provider_user_id.to_string()))
}

/// 세션 직렬화 서비스
#[service]
pub struct SessionService {
    user_repo: Arc<UserRepository>,
    external_user_repo: Arc<ExternalUserRepository>,
}

impl SessionService {
    /// 인증 주체를 세션에 저장할 영속 식별자로 줄입니다.
    pub fn serialize(&self, principal: &AuthenticatedUser) -> String {
        encode_principal(
            principal.identity.provider_name,
            principal.provider_user_id(),
        )
    }

    /// 영속 식별자를 완전한 인증 주체로 복원합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(AuthenticatedUser))` - 주체 복원 성공
    /// * `Ok(None)` - 해당 아이덴티티 없음 (빈 주체) 또는 소유 사용자 삭제됨
    /// * `Err(AppError::ValidationError)` - 토큰 형식 오류
    /// * `Err(AppError::DatabaseError)` - 저장소 오류 (요청 파이프라인 실패)
    pub async fn deserialize(&self, token: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        let (provider, provider_user_id) = parse_principal(token)?;

        let identity = match self.external_user_repo
            .find_by_provider_identity(provider, &provider_user_id)
            .await?
        {
            Some(identity) => identity,
            None => return Ok(None),
        };

        let user = match self.user_repo.find_by_id(&identity.user_id_string()).await? {
            Some(user) => user,
            None => {
                log::warn!(
                    "세션의 외부 아이덴티티 {}가 삭제된 사용자를 참조합니다",
                    provider_user_id
                );
                return Ok(None);
            }
        };

        Ok(Some(AuthenticatedUser { user, identity }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_parse_round_trip() {
        let token = encode_principal(ProviderName::GitHub, "gh123");
        assert_eq!(token, "github:gh123");

        let (provider, provider_user_id) = parse_principal(&token).unwrap();

        assert_eq!(provider, ProviderName::GitHub);
        // 식별 성분은 원래의 프로바이더 사용자 ID와 같아야 한다
        assert_eq!(provider_user_id, "gh123");
    }

    #[test]
    fn test_round_trip_for_all_providers() {
        for provider in [ProviderName::GitHub, ProviderName::Google] {
            let token = encode_principal(provider, "110248495921238986420");
            let (parsed_provider, id) = parse_principal(&token).unwrap();

            assert_eq!(parsed_provider, provider);
            assert_eq!(id, "110248495921238986420");
        }
    }

    #[test]
    fn test_malformed_token_rejected() {
        // 구분자 없음
        assert!(matches!(
            parse_principal("gh123"),
            Err(AppError::ValidationError(_))
        ));

        // 식별자 없음
        assert!(matches!(
            parse_principal("github:"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(matches!(
            parse_principal("facebook:fb1"),
            Err(AppError::ValidationError(_))
        ));
    }
}
