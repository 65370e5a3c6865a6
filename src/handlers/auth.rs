//! Authentication HTTP Handlers
//!
//! OAuth 2.0 소셜 로그인과 관련된 HTTP 엔드포인트를 처리하는 핸들러입니다.
//!
//! # Endpoints
//!
//! - **핸드셰이크 시작**: `GET /login/github`, `GET /login/google`
//!   (프로바이더 인증 페이지로 302 리다이렉트)
//! - **콜백**: `GET /oauth/github/callback`, `GET /oauth/google/callback`
//!   성공 시 세션 쿠키를 설정하고 성공 URL로, 실패 시 `message` 쿼리
//!   파라미터와 함께 실패 URL로 리다이렉트
//! - **현재 사용자**: `GET /api/v1/auth/me` (세션 토큰을 주체로 복원)
//!
//! 프로바이더 핸드셰이크 실패는 프로세스를 중단시키지 않고 항상 실패
//! 리다이렉트로 회복됩니다.

use actix_web::{cookie::Cookie, get, http::header, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::{
    config::{LoginRedirectConfig, ProviderName},
    services::auth::{GitHubAuthService, GoogleAuthService, IdentityService, SessionService},
};
use crate::domain::dto::users::request::OAuthCallbackQuery;
use crate::domain::dto::users::response::{ExternalUserResponse, UserResponse};
use crate::domain::models::oauth::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;

/// 세션 토큰을 담는 쿠키 이름
const SESSION_COOKIE: &str = "session_token";

#[get("/login/github")]
pub async fn github_login() -> Result<HttpResponse, AppError> {
    let github_service = GitHubAuthService::instance();
    let url_response = github_service.login_url()?;

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, url_response.login_url))
        .finish())
}

#[get("/login/google")]
pub async fn google_login() -> Result<HttpResponse, AppError> {
    let google_service = GoogleAuthService::instance();
    let url_response = google_service.login_url()?;

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, url_response.login_url))
        .finish())
}

#[get("/oauth/github/callback")]
pub async fn github_oauth_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> HttpResponse {
    let query = query.into_inner();

    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let message = query.error_description
            .as_deref()
            .unwrap_or("Cannot login to GitHub, please try again later!");
        log::warn!("GitHub OAuth 에러: {} - {}", error, message);
        return failure_redirect(message);
    }

    let (Some(code), Some(state)) = (query.code, query.state) else {
        log::warn!("GitHub OAuth 콜백에 code/state 누락");
        return failure_redirect("Cannot login to GitHub, please try again later!");
    };

    let github_service = GitHubAuthService::instance();

    // 프로바이더 핸드셰이크 완료 (토큰 교환 + 프로필 조회)
    let profile = match github_service.authenticate_with_code(&code, &state).await {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("GitHub 인증 실패: {}", e);
            return failure_redirect("Cannot login to GitHub, please try again later!");
        }
    };

    complete_login(ProviderName::GitHub, profile).await
}

#[get("/oauth/google/callback")]
pub async fn google_oauth_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> HttpResponse {
    let query = query.into_inner();

    if let Some(error) = &query.error {
        let message = query.error_description
            .as_deref()
            .unwrap_or("Cannot login to Google, please try again later!");
        log::warn!("Google OAuth 에러: {} - {}", error, message);
        return failure_redirect(message);
    }

    let (Some(code), Some(state)) = (query.code, query.state) else {
        log::warn!("Google OAuth 콜백에 code/state 누락");
        return failure_redirect("Cannot login to Google, please try again later!");
    };

    let google_service = GoogleAuthService::instance();

    let profile = match google_service.authenticate_with_code(&code, &state).await {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("Google 인증 실패: {}", e);
            return failure_redirect("Cannot login to Google, please try again later!");
        }
    };

    complete_login(ProviderName::Google, profile).await
}

/// 세션 토큰으로 현재 인증 주체를 조회합니다.
#[get("/me")]
pub async fn current_user(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let cookie = req.cookie(SESSION_COOKIE)
        .ok_or_else(|| AppError::AuthenticationError("로그인이 필요합니다".to_string()))?;

    let session_service = SessionService::instance();

    // 토큰 형식 오류와 저장소 오류는 그대로 전파되어 파이프라인을 실패시킨다
    let principal = session_service
        .deserialize(cookie.value())
        .await?
        .ok_or_else(|| AppError::AuthenticationError("세션이 유효하지 않습니다".to_string()))?;

    let user = UserResponse::from(principal.user);
    let identity = ExternalUserResponse::from(principal.identity);

    Ok(HttpResponse::Ok().json(json!({
        "user": user,
        "identity": identity,
    })))
}

/// 핸드셰이크가 끝난 프로필로 로그인을 완료합니다.
///
/// 아이덴티티 연동(returning user 판별 / 최초 로그인 프로비저닝) 후
/// 세션 토큰을 쿠키로 설정하고 성공 URL로 리다이렉트합니다.
/// 연동 실패는 실패 URL 리다이렉트로 회복됩니다.
async fn complete_login(provider: ProviderName, profile: ProviderProfile) -> HttpResponse {
    let identity_service = IdentityService::instance();
    let session_service = SessionService::instance();

    let principal = match identity_service.resolve_external_login(provider, profile).await {
        Ok(principal) => principal,
        Err(e) => {
            log::error!("{} 아이덴티티 연동 실패: {}", provider, e);
            return failure_redirect("Login failed, please try again later!");
        }
    };

    let token = session_service.serialize(&principal);

    log::info!(
        "{} 로그인 성공: username={}",
        provider, principal.user.username
    );

    success_redirect(token)
}

/// 세션 쿠키와 함께 성공 URL로 리다이렉트합니다.
fn success_redirect(session_token: String) -> HttpResponse {
    let cookie = Cookie::build(SESSION_COOKIE, session_token)
        .path("/")
        .http_only(true)
        .finish();

    HttpResponse::Found()
        .append_header((header::LOCATION, LoginRedirectConfig::success_url()))
        .cookie(cookie)
        .finish()
}

/// 실패 사유를 `message` 쿼리 파라미터로 담아 실패 URL로 리다이렉트합니다.
fn failure_redirect(message: &str) -> HttpResponse {
    let url = format!(
        "{}?message={}",
        LoginRedirectConfig::failure_url(),
        urlencoding::encode(message)
    );

    HttpResponse::Found()
        .append_header((header::LOCATION, url))
        .finish()
}
