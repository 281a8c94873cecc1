pub mod article;
pub mod certificate;
pub mod project;
pub mod project_category;
pub mod sqlx_repo;
pub mod tag;
pub mod user;

/// Helper to compute OFFSET safely from 1-based `page` and `limit`.
pub(crate) fn page_offset(page: u32, limit: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (limit as i64)
}
