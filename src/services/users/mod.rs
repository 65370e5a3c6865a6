//! 사용자 관리 서비스 모듈
//!
//! 사용자 계정 생명주기와 관련된 비즈니스 로직을 담당합니다.
//! 계정 생성, 조회, 부분 업데이트, 삭제, 목록 조회를 제공합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (cost factor 10)
//! - 사용자명 중복 방지
//! - 입력값 검증
//! - 응답에서 비밀번호 해시 제외

pub mod user_service;
