//! 문자열 검증 유틸리티
//!
//! 저장소 / 서비스 계층에서 공통으로 사용하는 필수 인자 검증 함수들입니다.
//! 인자가 비어 있으면 `AppError::ValidationError`로 실패합니다.

use crate::errors::errors::AppError;

/// 필수 문자열 인자를 검증합니다.
///
/// 앞뒤 공백을 제거한 뒤 비어 있으면 `ValidationError`를 반환하고,
/// 그렇지 않으면 정리된 문자열을 반환합니다.
///
/// # 인자
///
/// * `value` - 검증할 문자열
/// * `field_name` - 에러 메시지에 사용할 필드 이름
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다.
///
/// 공백만 있는 값은 `None`으로 정규화합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        // 성공 케이스
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        // 실패 케이스
        assert!(matches!(
            validate_required_string("", "user_id"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            validate_required_string("   ", "provider_user_id"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_required_string_message_contains_field() {
        let err = validate_required_string("", "user_id").unwrap_err();
        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("abc".to_string())), Some("abc".to_string()));
        assert_eq!(clean_optional_string(Some("  abc  ".to_string())), Some("abc".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }
}
