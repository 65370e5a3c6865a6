use serde::{Deserialize, Serialize};
use validator::Validate;

/// 사용자 부분 업데이트 요청 DTO
///
/// 지정된 필드만 변경됩니다. 모든 필드가 비어 있으면 서비스 계층에서
/// `ValidationError`로 거부됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 50, message = "이름은 50자 이하여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(
        min = 3,
        max = 60,
        message = "사용자명은 3-60자 사이여야 합니다"
    ))]
    pub username: Option<String>,

    /// 새 비밀번호 (지정 시 재해싱되어 저장됨)
    #[validate(length(min = 1, message = "비밀번호는 비어 있을 수 없습니다"))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// 변경할 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_detected() {
        let req = UpdateUserRequest {
            name: None,
            username: None,
            password: None,
        };
        assert!(req.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_partial_update_valid() {
        let req = UpdateUserRequest {
            name: Some("New Name".to_string()),
            username: None,
            password: None,
        };
        assert!(!req.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_new_password_rejected() {
        let req = UpdateUserRequest {
            name: None,
            username: None,
            password: Some("".to_string()),
        };
        assert!(req.validate().is_err());
    }
}
