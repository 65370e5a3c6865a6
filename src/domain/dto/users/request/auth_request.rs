use serde::Deserialize;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 프로바이더가 리다이렉트로 전달하는 파라미터입니다. 사용자가 인증을
/// 거부했거나 핸드셰이크가 실패하면 `code` 없이 `error`만 전달됩니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,

    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}
