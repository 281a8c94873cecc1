use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::{envelope, ListQuery};
use crate::domain::entities::article::ArticleForm;
use crate::errors::AppError;
use crate::AppState;

#[get("/articles")]
pub async fn list_articles(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .article_handler
        .list(&query.into_inner().into(), false)
        .await?;
    Ok(envelope::ok_list(
        "Articles retrieved successfully",
        "Articles not found",
        result,
    ))
}

#[get("/articles-front")]
pub async fn list_articles_front(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .article_handler
        .list(&query.into_inner().into(), true)
        .await?;
    Ok(envelope::ok_list(
        "Articles retrieved successfully",
        "Articles not found",
        result,
    ))
}

#[get("/articles/{slug}")]
pub async fn get_article(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let article = state.article_handler.get(&slug).await?;
    Ok(envelope::ok("Article retrieved successfully", article))
}

#[get("/articles-front/{slug}")]
pub async fn get_article_front(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match state.article_handler.get_front(&slug).await? {
        Some(article) => Ok(envelope::ok("Article retrieved successfully", article)),
        None => Ok(envelope::ok_null("Article not found")),
    }
}

#[post("/articles")]
pub async fn create_article(
    state: web::Data<AppState>,
    form: MultipartForm<ArticleForm>,
) -> Result<HttpResponse, AppError> {
    let (input, image) = form.into_inner().into_parts()?;
    let article = state.article_handler.create(input, image).await?;
    Ok(envelope::created("Article created successfully", article))
}

#[patch("/articles/{slug}")]
pub async fn update_article(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    form: MultipartForm<ArticleForm>,
) -> Result<HttpResponse, AppError> {
    let (input, image) = form.into_inner().into_parts()?;
    let article = state.article_handler.update(&slug, input, image).await?;
    Ok(envelope::ok("Article updated successfully", article))
}

#[patch("/articles/status/{slug}")]
pub async fn toggle_article_status(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.article_handler.toggle_status(&slug).await?;
    Ok(envelope::ok_message("Article update status successfully"))
}

#[delete("/articles/{slug}")]
pub async fn delete_article(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.article_handler.delete(&slug).await?;
    Ok(envelope::ok_message("Article deleted successfully"))
}
