//! # Google OAuth 2.0 인증 서비스
//!
//! Google Authorization Code Grant 플로우의 프로바이더 쪽 처리를 담당합니다.
//! 인증 URL 생성, 코드 → 액세스 토큰 교환, 사용자 정보 조회까지가
//! 이 서비스의 범위이며, 결과는 프로바이더 중립 `ProviderProfile`로
//! 정규화되어 아이덴티티 연동 서비스로 전달됩니다.
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. 사용자 → 인증 URL로 리다이렉트 (login_url)
//! 2. Google → 인증 후 authorization_code와 함께 콜백으로 리다이렉트
//! 3. 서버 → authorization_code를 access_token으로 교환
//! 4. 서버 → access_token으로 사용자 정보 조회 → ProviderProfile
//! ```

use singleton_macro::service;
use uuid::Uuid;
use crate::config::GoogleOAuthConfig;
use crate::domain::dto::users::response::oauth_token_response::{GoogleTokenResponse, OAuthLoginUrlResponse};
use crate::domain::models::oauth::google_user::GoogleUserInfo;
use crate::domain::models::oauth::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;

/// Google OAuth 프로바이더 서비스
#[service]
pub struct GoogleAuthService {
    // 외부 의존성 없음
}

impl GoogleAuthService {
    /// Google 인증 페이지로의 로그인 URL을 생성합니다.
    ///
    /// CSRF 방지용 state는 uuid v4로 생성됩니다.
    pub fn login_url(&self) -> Result<OAuthLoginUrlResponse, AppError> {
        let state = self.generate_oauth_state();

        let params = [
            ("client_id", GoogleOAuthConfig::client_id()),
            ("redirect_uri", GoogleOAuthConfig::redirect_uri()),
            ("scope", "openid email profile".to_string()),
            ("response_type", "code".to_string()),
            ("state", state.clone()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let login_url = format!("{}?{}", GoogleOAuthConfig::auth_uri(), query_string);

        Ok(OAuthLoginUrlResponse { login_url, state })
    }

    /// Authorization code로 인증을 완료하고 정규화된 프로필을 반환합니다.
    ///
    /// # 처리 단계
    ///
    /// 1. State 검증
    /// 2. Authorization code로 액세스 토큰 교환
    /// 3. 액세스 토큰으로 사용자 정보 조회
    /// 4. `ProviderProfile`로 정규화
    ///
    /// # 에러
    ///
    /// * `AppError::AuthenticationError` - 유효하지 않은 state
    /// * `AppError::ExternalServiceError` - Google API 호출 실패
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> Result<ProviderProfile, AppError> {
        // 1. State 검증
        self.verify_oauth_state(state)?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(auth_code).await?;

        // 3. 액세스 토큰으로 사용자 정보 조회
        let google_user = self.get_user_info(&token_response.access_token).await?;

        log::info!("Google 프로필 조회 성공: provider_user_id={}", google_user.id);

        // 4. 프로바이더 중립 프로필로 정규화
        Ok(ProviderProfile::from(google_user))
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> Result<GoogleTokenResponse, AppError> {
        let client = reqwest::Client::new();

        let params = [
            ("code", auth_code),
            ("client_id", &GoogleOAuthConfig::client_id()),
            ("client_secret", &GoogleOAuthConfig::client_secret()),
            ("redirect_uri", &GoogleOAuthConfig::redirect_uri()),
            ("grant_type", "authorization_code"),
        ];

        let response = client
            .post(&GoogleOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패: {}", error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(&GoogleOAuthConfig::user_info_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}", error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    fn generate_oauth_state(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn verify_oauth_state(&self, state: &str) -> Result<(), AppError> {
        // TODO: state를 Redis에 임시 저장해 콜백에서 대조 검증
        if state.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 OAuth state".to_string()));
        }

        Ok(())
    }
}
