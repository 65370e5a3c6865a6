//! 프로바이더 중립 프로필 모델
//!
//! OAuth 핸드셰이크 완료 후 프로바이더가 반환한 사용자 정보를
//! 아이덴티티 연동 로직이 소비하는 공통 형태로 정규화합니다.

use serde::{Deserialize, Serialize};
use super::github_user::GitHubUserInfo;
use super::google_user::GoogleUserInfo;

/// 정규화된 외부 프로바이더 프로필
///
/// `provider_user_id`는 프로바이더가 부여한 안정적 사용자 식별자이며,
/// 아이덴티티 연동과 세션 직렬화의 기준 값입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// 프로바이더 쪽 사용자 ID (GitHub 숫자 ID는 문자열로 변환)
    pub provider_user_id: String,
    /// 표시 이름
    pub display_name: String,
    /// 로그인 이름 또는 이메일 (사용자명 생성의 기반)
    pub login_name: String,
    /// 프로필 이미지 URL
    pub picture: Option<String>,
}

impl From<GitHubUserInfo> for ProviderProfile {
    fn from(info: GitHubUserInfo) -> Self {
        // GitHub는 표시 이름(name)이 비어 있을 수 있으므로 login으로 대체
        let display_name = info.name.unwrap_or_else(|| info.login.clone());

        Self {
            provider_user_id: info.id.to_string(),
            display_name,
            login_name: info.login,
            picture: info.avatar_url,
        }
    }
}

impl From<GoogleUserInfo> for ProviderProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider_user_id: info.id,
            display_name: info.name,
            login_name: info.email,
            picture: info.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_profile_normalization() {
        let info = GitHubUserInfo {
            id: 583231,
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            email: Some("octocat@github.com".to_string()),
            avatar_url: Some("https://avatars.githubusercontent.com/u/583231".to_string()),
        };

        let profile = ProviderProfile::from(info);

        // 숫자 ID는 문자열로 정규화
        assert_eq!(profile.provider_user_id, "583231");
        assert_eq!(profile.display_name, "The Octocat");
        assert_eq!(profile.login_name, "octocat");
        assert!(profile.picture.is_some());
    }

    #[test]
    fn test_github_display_name_falls_back_to_login() {
        let info = GitHubUserInfo {
            id: 1,
            login: "ghost".to_string(),
            name: None,
            email: None,
            avatar_url: None,
        };

        let profile = ProviderProfile::from(info);

        assert_eq!(profile.display_name, "ghost");
        assert_eq!(profile.login_name, "ghost");
    }

    #[test]
    fn test_google_profile_normalization() {
        let info = GoogleUserInfo {
            id: "110248495921238986420".to_string(),
            email: "alice@gmail.com".to_string(),
            name: "Alice Kim".to_string(),
            given_name: Some("Alice".to_string()),
            family_name: Some("Kim".to_string()),
            picture: Some("https://lh3.googleusercontent.com/a/abc".to_string()),
            verified_email: true,
        };

        let profile = ProviderProfile::from(info);

        assert_eq!(profile.provider_user_id, "110248495921238986420");
        assert_eq!(profile.display_name, "Alice Kim");
        // Google은 이메일이 로그인 이름 역할
        assert_eq!(profile.login_name, "alice@gmail.com");
    }
}
