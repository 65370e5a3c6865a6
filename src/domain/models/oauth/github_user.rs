//! GitHub 사용자 정보 모델
//!
//! GitHub `GET /user` API 응답 중 이 서비스가 사용하는 필드만 역직렬화합니다.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GitHubUserInfo {
    /// GitHub 숫자 사용자 ID
    pub id: i64,

    pub login: String,

    /// 표시 이름 (설정하지 않은 계정은 null)
    pub name: Option<String>,

    /// 공개 이메일 (비공개 설정 시 null)
    pub email: Option<String>,

    pub avatar_url: Option<String>,
}
