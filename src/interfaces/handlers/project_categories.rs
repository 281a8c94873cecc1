use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::{envelope, ListQuery};
use crate::domain::entities::project_category::ProjectCategoryPayload;
use crate::errors::AppError;
use crate::AppState;

#[get("/project-categories")]
pub async fn list_project_categories(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .category_handler
        .list(&query.into_inner().into())
        .await?;
    Ok(envelope::ok_list(
        "Project categories retrieved successfully",
        "Project categories not found",
        result,
    ))
}

#[get("/project-categories/{uuid}")]
pub async fn get_project_category(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = state.category_handler.get(&uuid).await?;
    Ok(envelope::ok("Project category retrieved successfully", category))
}

#[post("/project-categories")]
pub async fn create_project_category(
    state: web::Data<AppState>,
    payload: web::Json<ProjectCategoryPayload>,
) -> Result<HttpResponse, AppError> {
    let category = state.category_handler.create(payload.into_inner()).await?;
    Ok(envelope::created("Project category created successfully", category))
}

#[patch("/project-categories/{uuid}")]
pub async fn update_project_category(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
    payload: web::Json<ProjectCategoryPayload>,
) -> Result<HttpResponse, AppError> {
    let category = state
        .category_handler
        .update(&uuid, payload.into_inner())
        .await?;
    Ok(envelope::ok("Project category updated successfully", category))
}

#[delete("/project-categories/{uuid}")]
pub async fn delete_project_category(
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.category_handler.delete(&uuid).await?;
    Ok(envelope::ok_message("Project category deleted successfully"))
}
