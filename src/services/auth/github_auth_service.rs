//! # GitHub OAuth 2.0 인증 서비스
//!
//! GitHub Authorization Code 플로우의 프로바이더 쪽 처리를 담당합니다.
//! Google 플로우와 구조는 같지만 GitHub 고유의 요구사항이 있습니다:
//! 토큰 엔드포인트는 `Accept: application/json` 헤더가 있어야 JSON으로
//! 응답하고, 사용자 API는 `User-Agent` 헤더를 요구합니다.

use singleton_macro::service;
use uuid::Uuid;
use crate::config::GitHubOAuthConfig;
use crate::domain::dto::users::response::oauth_token_response::{GitHubTokenResponse, OAuthLoginUrlResponse};
use crate::domain::models::oauth::github_user::GitHubUserInfo;
use crate::domain::models::oauth::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;

/// GitHub API가 요구하는 User-Agent 값
const USER_AGENT: &str = concat!("social_login_backend/", env!("CARGO_PKG_VERSION"));

/// GitHub OAuth 프로바이더 서비스
#[service]
pub struct GitHubAuthService {
    // 외부 의존성 없음
}

impl GitHubAuthService {
    /// GitHub 인증 페이지로의 로그인 URL을 생성합니다.
    pub fn login_url(&self) -> Result<OAuthLoginUrlResponse, AppError> {
        let state = self.generate_oauth_state();

        let params = [
            ("client_id", GitHubOAuthConfig::client_id()),
            ("redirect_uri", GitHubOAuthConfig::redirect_uri()),
            ("scope", "read:user user:email".to_string()),
            ("state", state.clone()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let login_url = format!("{}?{}", GitHubOAuthConfig::auth_uri(), query_string);

        Ok(OAuthLoginUrlResponse { login_url, state })
    }

    /// Authorization code로 인증을 완료하고 정규화된 프로필을 반환합니다.
    ///
    /// # 에러
    ///
    /// * `AppError::AuthenticationError` - 유효하지 않은 state
    /// * `AppError::ExternalServiceError` - GitHub API 호출 실패
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> Result<ProviderProfile, AppError> {
        // 1. State 검증
        self.verify_oauth_state(state)?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(auth_code).await?;

        // 3. 액세스 토큰으로 사용자 정보 조회
        let github_user = self.get_user_info(&token_response.access_token).await?;

        log::info!("GitHub 프로필 조회 성공: provider_user_id={}", github_user.id);

        // 4. 프로바이더 중립 프로필로 정규화
        Ok(ProviderProfile::from(github_user))
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> Result<GitHubTokenResponse, AppError> {
        let client = reqwest::Client::new();

        let params = [
            ("code", auth_code),
            ("client_id", &GitHubOAuthConfig::client_id()),
            ("client_secret", &GitHubOAuthConfig::client_secret()),
            ("redirect_uri", &GitHubOAuthConfig::redirect_uri()),
        ];

        // GitHub는 Accept 헤더가 없으면 form-urlencoded로 응답한다
        let response = client
            .post(&GitHubOAuthConfig::token_uri())
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "GitHub 토큰 교환 실패: {}", error_text
            )));
        }

        response
            .json::<GitHubTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, access_token: &str) -> Result<GitHubUserInfo, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(&GitHubOAuthConfig::user_api_uri())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "GitHub 사용자 정보 조회 실패: {}", error_text
            )));
        }

        response
            .json::<GitHubUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("GitHub 사용자 정보 파싱 실패: {}", e)))
    }

    fn generate_oauth_state(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn verify_oauth_state(&self, state: &str) -> Result<(), AppError> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 OAuth state".to_string()));
        }

        Ok(())
    }
}
