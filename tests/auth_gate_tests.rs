use actix_web::{test, web, App};
use chrono::Utc;
use uuid::Uuid;

use portfolio_cms::entities::user::User;
use portfolio_cms::infrastructure::auth::jwt::JwtService;
use portfolio_cms::middlewares::auth::AuthMiddleware;
use portfolio_cms::routes::configure_routes;
use portfolio_cms::settings::{AppConfig, AppEnvironment};
use portfolio_cms::AppState;

fn config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://localhost/portfolio_test".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "integration_test_secret_long_enough_for_hs512_keys".into(),
        jwt_expiration_minutes: 60,
        upload_dir: std::env::temp_dir()
            .join(format!("gate-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    }
}

/// The pool connects lazily, so routes that never reach the database can be
/// exercised without a live server.
fn state(config: &AppConfig) -> web::Data<AppState> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    web::Data::new(AppState::new(config, pool))
}

fn bearer(config: &AppConfig) -> String {
    let user = User {
        id: 1,
        uuid: Uuid::new_v4(),
        name: "Admin".into(),
        email: "admin@example.com".into(),
        password: "hash".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let token = JwtService::new(config).create_jwt(&user).unwrap();
    format!("Bearer {token}")
}

macro_rules! gate_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(AuthMiddleware)
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_token_is_rejected_with_the_envelope() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::get().uri("/api/v1/articles").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["status"], 401);
    assert!(body["data"].is_null());
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::get()
        .uri("/api/v1/articles")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn valid_token_passes_the_gate_and_echoes_claims() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::post()
        .uri("/api/v1/validate-token")
        .insert_header(("Authorization", bearer(&config)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Token is valid");
    assert_eq!(body["data"]["email"], "admin@example.com");
}

#[actix_web::test]
async fn logout_acknowledges_authenticated_callers() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::post()
        .uri("/api/v1/logout")
        .insert_header(("Authorization", bearer(&config)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logout success");
}

#[actix_web::test]
async fn home_is_public() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn unknown_routes_answer_with_the_default_envelope() {
    let config = config();
    let app = gate_app!(state(&config));

    let req = test::TestRequest::get()
        .uri("/api/v1/unknown")
        .insert_header(("Authorization", bearer(&config)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["status"], 404);
}
