use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
/// `username`이 유일한 식별 필드이며, 비밀번호는 선택입니다
/// (외부 프로바이더 전용 계정은 자격 증명 없이 만들 수 있습니다).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 표시 이름
    #[validate(length(
        max = 50,
        message = "이름은 50자 이하여야 합니다"
    ))]
    #[serde(default)]
    pub name: String,

    /// 사용자명 (3-60자, 이메일 주소도 허용)
    #[validate(length(
        min = 3,
        max = 60,
        message = "사용자명은 3-60자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 계정 비밀번호 (선택, 외부 프로바이더 전용 계정은 생략)
    #[validate(length(min = 1, message = "비밀번호는 비어 있을 수 없습니다"))]
    pub password: Option<String>,
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어, 이메일 문자만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '@' || c == '.' || c == '-')
    {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명에 허용되지 않는 문자가 포함되어 있습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: "Alice".to_string(),
            username: username.to_string(),
            password: password.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("alice", Some("secret")).validate().is_ok());
        // 이메일 형태의 사용자명도 허용
        assert!(request("alice@example.com", None).validate().is_ok());
    }

    #[test]
    fn test_password_is_optional() {
        assert!(request("alice", None).validate().is_ok());
    }

    #[test]
    fn test_short_username_rejected() {
        assert!(request("ab", None).validate().is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(request("alice", Some("")).validate().is_err());
    }

    #[test]
    fn test_username_with_invalid_characters_rejected() {
        assert!(request("alice smith", None).validate().is_err());
        assert!(request("alice!", None).validate().is_err());
    }
}
