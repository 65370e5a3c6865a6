//! OAuth 프로바이더 및 로그인 리다이렉트 설정
//!
//! GitHub / Google OAuth 2.0 클라이언트 자격 증명과 엔드포인트,
//! 로그인 성공/실패 리다이렉트 URL을 환경변수에서 읽어옵니다.

use std::env;

/// GitHub OAuth 2.0 클라이언트 설정
pub struct GitHubOAuthConfig;

impl GitHubOAuthConfig {
    pub fn client_id() -> String {
        env::var("GITHUB_CLIENT_ID")
            .expect("GITHUB_CLIENT_ID must be set")
    }

    pub fn client_secret() -> String {
        env::var("GITHUB_CLIENT_SECRET")
            .expect("GITHUB_CLIENT_SECRET must be set")
    }

    pub fn redirect_uri() -> String {
        env::var("GITHUB_REDIRECT_URI")
            .expect("GITHUB_REDIRECT_URI must be set")
    }

    pub fn auth_uri() -> String {
        env::var("GITHUB_AUTH_URI")
            .unwrap_or_else(|_| "https://github.com/login/oauth/authorize".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GITHUB_TOKEN_URI")
            .unwrap_or_else(|_| "https://github.com/login/oauth/access_token".to_string())
    }

    /// 사용자 프로필 조회 API 엔드포인트
    pub fn user_api_uri() -> String {
        env::var("GITHUB_USER_API_URI")
            .unwrap_or_else(|_| "https://api.github.com/user".to_string())
    }
}

/// Google OAuth 2.0 클라이언트 설정
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> String {
        env::var("GOOGLE_CLIENT_ID")
            .expect("GOOGLE_CLIENT_ID must be set")
    }

    pub fn client_secret() -> String {
        env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET must be set")
    }

    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI")
            .expect("GOOGLE_REDIRECT_URI must be set")
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// 사용자 프로필 조회 API 엔드포인트
    pub fn user_info_uri() -> String {
        env::var("GOOGLE_USER_INFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// 로그인 결과 리다이렉트 설정
///
/// 프로바이더 콜백 처리 후 브라우저를 보낼 목적지 URL입니다.
pub struct LoginRedirectConfig;

impl LoginRedirectConfig {
    /// 로그인 성공 시 리다이렉트할 URL (`SUCCESSFUL_LOGIN_REDIRECT`)
    pub fn success_url() -> String {
        env::var("SUCCESSFUL_LOGIN_REDIRECT")
            .unwrap_or_else(|_| {
                log::warn!("SUCCESSFUL_LOGIN_REDIRECT not set, using default \"/\"");
                "/".to_string()
            })
    }

    /// 로그인 실패 시 리다이렉트할 URL (`FAILED_LOGIN_REDIRECT`)
    ///
    /// 실패 사유는 `message` 쿼리 파라미터로 전달됩니다.
    pub fn failure_url() -> String {
        env::var("FAILED_LOGIN_REDIRECT")
            .unwrap_or_else(|_| {
                log::warn!("FAILED_LOGIN_REDIRECT not set, using default \"/login\"");
                "/login".to_string()
            })
    }
}

/// 외부 인증 프로바이더 식별자
///
/// 와이어/저장 형식은 소문자 문자열(`github`, `google`)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    GitHub,

    Google,
}

impl ProviderName {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "github" => Ok(ProviderName::GitHub),
            "google" => Ok(ProviderName::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::GitHub => "github",
            ProviderName::Google => "google",
        }
    }
}

impl std::fmt::Display for ProviderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name_from_string() {
        assert_eq!(ProviderName::from_str("github").unwrap(), ProviderName::GitHub);
        assert_eq!(ProviderName::from_str("google").unwrap(), ProviderName::Google);

        // 대소문자 무관 테스트
        assert_eq!(ProviderName::from_str("GitHub").unwrap(), ProviderName::GitHub);
        assert_eq!(ProviderName::from_str("GOOGLE").unwrap(), ProviderName::Google);

        // 지원하지 않는 프로바이더 테스트
        assert!(ProviderName::from_str("facebook").is_err());
        assert!(ProviderName::from_str("unknown").is_err());
    }

    #[test]
    fn test_provider_name_round_trip() {
        for provider in [ProviderName::GitHub, ProviderName::Google] {
            assert_eq!(ProviderName::from_str(provider.as_str()).unwrap(), provider);
        }
    }

    #[test]
    fn test_provider_name_wire_format() {
        // 저장/세션 토큰에 쓰이는 와이어 형식은 소문자 고정
        assert_eq!(ProviderName::GitHub.as_str(), "github");
        assert_eq!(ProviderName::Google.as_str(), "google");

        let json = serde_json::to_string(&ProviderName::GitHub).unwrap();
        assert_eq!(json, "\"github\"");
        let back: ProviderName = serde_json::from_str("\"google\"").unwrap();
        assert_eq!(back, ProviderName::Google);
    }
}
