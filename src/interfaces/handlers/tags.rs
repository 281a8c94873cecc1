use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::{envelope, ListQuery};
use crate::domain::entities::tag::TagPayload;
use crate::errors::AppError;
use crate::AppState;

#[get("/tags")]
pub async fn list_tags(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state.tag_handler.list(&query.into_inner().into()).await?;
    Ok(envelope::ok_list(
        "Tags retrieved successfully",
        "Tags not found",
        result,
    ))
}

#[get("/tags/{uuid}")]
pub async fn get_tag(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tag = state.tag_handler.get(&uuid).await?;
    Ok(envelope::ok("Tag retrieved successfully", tag))
}

#[post("/tags")]
pub async fn create_tag(
    state: web::Data<AppState>,
    payload: web::Json<TagPayload>,
) -> Result<HttpResponse, AppError> {
    let tag = state.tag_handler.create(payload.into_inner()).await?;
    Ok(envelope::created("Tag created successfully", tag))
}

#[patch("/tags/{uuid}")]
pub async fn update_tag(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
    payload: web::Json<TagPayload>,
) -> Result<HttpResponse, AppError> {
    let tag = state.tag_handler.update(&uuid, payload.into_inner()).await?;
    Ok(envelope::ok("Tag updated successfully", tag))
}

#[delete("/tags/{uuid}")]
pub async fn delete_tag(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.tag_handler.delete(&uuid).await?;
    Ok(envelope::ok_message("Tag deleted successfully"))
}
