use actix_multipart::form::MultipartFormConfig;
use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::json;

/// Malformed JSON and multipart payloads get the standard envelope instead
/// of actix's plain-text defaults.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(json!({
            "message": format!("Invalid JSON payload: {}", err),
            "status": 400
        }));
        InternalError::from_response(err, body).into()
    }));
    cfg.app_data(MultipartFormConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(json!({
            "message": format!("Invalid multipart payload: {}", err),
            "status": 400
        }));
        InternalError::from_response(err, body).into()
    }));
}
