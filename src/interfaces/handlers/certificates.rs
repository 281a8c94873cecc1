use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::{envelope, ListQuery};
use crate::domain::entities::certificate::CertificatePayload;
use crate::errors::AppError;
use crate::AppState;

#[get("/certificates")]
pub async fn list_certificates(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .certificate_handler
        .list(&query.into_inner().into())
        .await?;
    Ok(envelope::ok_list(
        "Certificates retrieved successfully",
        "Certificates not found",
        result,
    ))
}

/// Public listing; certificates have no active flag, so this mirrors the
/// admin listing.
#[get("/certificates-front")]
pub async fn list_certificates_front(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .certificate_handler
        .list(&query.into_inner().into())
        .await?;
    Ok(envelope::ok_list(
        "Certificates retrieved successfully",
        "Certificates not found",
        result,
    ))
}

#[get("/certificates/{uuid}")]
pub async fn get_certificate(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let certificate = state.certificate_handler.get(&uuid).await?;
    Ok(envelope::ok("Certificate retrieved successfully", certificate))
}

#[post("/certificates")]
pub async fn create_certificate(
    state: web::Data<AppState>,
    payload: web::Json<CertificatePayload>,
) -> Result<HttpResponse, AppError> {
    let certificate = state
        .certificate_handler
        .create(payload.into_inner())
        .await?;
    Ok(envelope::created("Certificate created successfully", certificate))
}

#[patch("/certificates/{uuid}")]
pub async fn update_certificate(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
    payload: web::Json<CertificatePayload>,
) -> Result<HttpResponse, AppError> {
    let certificate = state
        .certificate_handler
        .update(&uuid, payload.into_inner())
        .await?;
    Ok(envelope::ok("Certificate updated successfully", certificate))
}

#[delete("/certificates/{uuid}")]
pub async fn delete_certificate(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.certificate_handler.delete(&uuid).await?;
    Ok(envelope::ok_message("Certificate deleted successfully"))
}
