use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::domain::use_cases::ListResult;

/// Every endpoint answers with the same envelope: `message`, numeric
/// `status`, and optionally `data`, `total` or `token`.
pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": message,
        "status": 200,
        "data": data
    }))
}

pub fn ok_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": message,
        "status": 200
    }))
}

pub fn ok_null(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": message,
        "status": 200,
        "data": null
    }))
}

/// Empty result sets are still a 200, with the "not found" phrasing and no
/// `total` key.
pub fn ok_list<T: Serialize>(
    found_message: &str,
    empty_message: &str,
    result: ListResult<T>,
) -> HttpResponse {
    if result.items.is_empty() {
        HttpResponse::Ok().json(json!({
            "message": empty_message,
            "status": 200,
            "data": []
        }))
    } else {
        HttpResponse::Ok().json(json!({
            "message": found_message,
            "status": 200,
            "data": result.items,
            "total": result.total
        }))
    }
}

pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Created().json(json!({
        "message": message,
        "status": 201,
        "data": data
    }))
}

pub fn ok_with_token<T: Serialize>(message: &str, data: T, token: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": message,
        "status": 200,
        "data": data,
        "token": token
    }))
}

pub fn not_found_default() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": "Not Found",
        "status": 404
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn empty_lists_drop_the_total_key() {
        let result: ListResult<String> = ListResult { items: Vec::new(), total: 0 };
        let body = body_json(ok_list("Things retrieved", "Things not found", result)).await;
        assert_eq!(body["message"], "Things not found");
        assert_eq!(body["data"], serde_json::json!([]));
        assert!(body.get("total").is_none());
    }

    #[actix_rt::test]
    async fn populated_lists_carry_the_total() {
        let result = ListResult { items: vec!["a".to_string()], total: 9 };
        let body = body_json(ok_list("Things retrieved", "Things not found", result)).await;
        assert_eq!(body["message"], "Things retrieved");
        assert_eq!(body["total"], 9);
    }

    #[actix_rt::test]
    async fn login_envelope_puts_the_token_beside_the_data() {
        let body = body_json(ok_with_token("Login success", serde_json::json!({}), "abc")).await;
        assert_eq!(body["token"], "abc");
        assert_eq!(body["status"], 200);
    }
}
