use actix_web::{get, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::constants::START_TIME;

#[get("/")]
pub async fn home() -> HttpResponse {
    let uptime = (Utc::now() - *START_TIME).num_seconds();
    HttpResponse::Ok().json(json!({
        "message": "Portfolio CMS API",
        "status": 200,
        "uptime_seconds": uptime
    }))
}
