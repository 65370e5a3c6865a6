//! OAuth 토큰 교환 응답 DTO 모듈
//!
//! Authorization Code를 Access Token으로 교환할 때 각 프로바이더가
//! 반환하는 응답을 정의합니다.

use serde::{Deserialize, Serialize};

/// GitHub OAuth 2.0 토큰 교환 응답
///
/// GitHub는 `Accept: application/json` 헤더가 있을 때만 JSON으로 응답합니다.
#[derive(Debug, Deserialize)]
pub struct GitHubTokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// Google OAuth 2.0 토큰 교환 응답
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: i32,
    pub refresh_token: Option<String>,
    pub scope: String,
}

/// OAuth 로그인 URL 응답
///
/// 프로바이더 인증 페이지로의 리다이렉트 URL과 CSRF 방지용 state 값입니다.
#[derive(Debug, Serialize)]
pub struct OAuthLoginUrlResponse {
    pub login_url: String,

    /// CSRF 방지용 state 파라미터
    pub state: String,
}
