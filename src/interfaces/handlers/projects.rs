use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::{envelope, ListQuery};
use crate::domain::entities::project::ProjectForm;
use crate::errors::AppError;
use crate::AppState;

#[get("/projects")]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .project_handler
        .list(&query.into_inner().into(), false)
        .await?;
    Ok(envelope::ok_list(
        "Projects retrieved successfully",
        "Projects not found",
        result,
    ))
}

#[get("/projects-front")]
pub async fn list_projects_front(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .project_handler
        .list(&query.into_inner().into(), true)
        .await?;
    Ok(envelope::ok_list(
        "Projects retrieved successfully",
        "Projects not found",
        result,
    ))
}

#[get("/projects/{slug}")]
pub async fn get_project(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let project = state.project_handler.get(&slug).await?;
    Ok(envelope::ok("Project retrieved successfully", project))
}

#[get("/projects-front/{slug}")]
pub async fn get_project_front(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match state.project_handler.get_front(&slug).await? {
        Some(project) => Ok(envelope::ok("Project retrieved successfully", project)),
        None => Ok(envelope::ok_null("Project not found")),
    }
}

#[post("/projects")]
pub async fn create_project(
    state: web::Data<AppState>,
    form: MultipartForm<ProjectForm>,
) -> Result<HttpResponse, AppError> {
    let (input, image) = form.into_inner().into_parts()?;
    let project = state.project_handler.create(input, image).await?;
    Ok(envelope::created("Project created successfully", project))
}

#[patch("/projects/{slug}")]
pub async fn update_project(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    form: MultipartForm<ProjectForm>,
) -> Result<HttpResponse, AppError> {
    let (input, image) = form.into_inner().into_parts()?;
    let project = state.project_handler.update(&slug, input, image).await?;
    Ok(envelope::ok("Project updated successfully", project))
}

#[patch("/projects/status/{slug}")]
pub async fn toggle_project_status(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.project_handler.toggle_status(&slug).await?;
    Ok(envelope::ok_message("Project update status successfully"))
}

#[delete("/projects/{slug}")]
pub async fn delete_project(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.project_handler.delete(&slug).await?;
    Ok(envelope::ok_message("Project deleted successfully"))
}
