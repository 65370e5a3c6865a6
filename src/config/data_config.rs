//! 데이터 및 서버 관련 환경 설정
//!
//! 실행 환경 구분, 비밀번호 해싱 비용, 서버 바인딩 설정을 담당합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 환경변수에서 읽어옵니다.
    ///
    /// `ENVIRONMENT` 환경변수를 우선 사용하며, 없으면 Production으로 간주합니다.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
///
/// bcrypt cost factor를 관리합니다. 운영 환경 기본값은 10이며,
/// 개발/테스트 환경에서는 빠른 실행을 위해 낮은 값을 사용합니다.
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 적용할 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경변수가 4..=15 범위의 값이면 그대로 사용하고,
    /// 그렇지 않으면 실행 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if cost >= 4 && cost <= 15 {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 10,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트를 반환합니다. (`SERVER_PORT`, 기본값 3080)
    pub fn port() -> u16 {
        env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3080".to_string())
            .parse()
            .unwrap_or(3080)
    }

    /// 서버 바인딩 주소를 반환합니다.
    pub fn bind_address() -> String {
        format!("127.0.0.1:{}", Self::port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("TEST"), Environment::Test);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        // 알 수 없는 값은 Production으로 간주
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_env() {
        // 개발/테스트 환경은 빠른 해싱
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        // 운영 계열은 cost 10
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 10);
    }
}
