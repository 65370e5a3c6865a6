//! 인증 서비스 모듈
//!
//! OAuth 2.0 프로바이더 핸드셰이크, 외부 아이덴티티 연동,
//! 세션 직렬화를 담당하는 서비스들입니다.

pub mod github_auth_service;
pub mod google_auth_service;
pub mod identity_service;
pub mod session_service;

pub use github_auth_service::*;
pub use google_auth_service::*;
pub use identity_service::*;
pub use session_service::*;
