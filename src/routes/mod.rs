//! HTTP 라우트 구성
//!
//! 전체 엔드포인트를 기능별로 묶어 등록합니다. 로그인/콜백 경로는
//! 프로바이더 설정의 리다이렉트 URI와 일치해야 하므로 루트 레벨에
//! 그대로 노출됩니다.

use crate::handlers;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    // 프로바이더 핸드셰이크 시작 / 콜백 (루트 레벨 경로)
    cfg.service(handlers::auth::github_login)
        .service(handlers::auth::google_login)
        .service(handlers::auth::github_oauth_callback)
        .service(handlers::auth::google_oauth_callback);

    // 세션 기반 현재 사용자 조회
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::current_user)
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::create_user)
            .service(handlers::users::list_users)
            .service(handlers::users::get_user_by_username)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_login_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "providers": ["github", "google"]
        }
    }))
}
