//! Google 사용자 정보 모델
//!
//! Google `oauth2/v2/userinfo` API 응답 중 이 서비스가 사용하는 필드만
//! 역직렬화합니다.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,

    pub email: String,

    pub name: String,

    pub given_name: Option<String>,

    pub family_name: Option<String>,

    pub picture: Option<String>,

    #[serde(default)]
    pub verified_email: bool,
}
