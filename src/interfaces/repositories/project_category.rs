use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::page_offset;
use super::sqlx_repo::SqlxProjectCategoryRepo;
use crate::domain::entities::project_category::ProjectCategory;
use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCategoryRepository: Send + Sync {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<ProjectCategory>, i64), AppError>;

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ProjectCategory>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ProjectCategory>, AppError>;

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<ProjectCategory>, AppError>;

    async fn create(&self, uuid: &Uuid, name: &str) -> Result<ProjectCategory, AppError>;

    async fn update_name(&self, id: i64, name: &str) -> Result<ProjectCategory, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError>;

    /// Number of projects still pointing at the category.
    async fn project_count(&self, id: i64) -> Result<i64, AppError>;
}

#[async_trait]
impl ProjectCategoryRepository for SqlxProjectCategoryRepo {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<ProjectCategory>, i64), AppError> {
        let pattern = format!("%{search}%");

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM project_categories WHERE name ILIKE ");
        query.push_bind(&pattern);
        query.push(" ORDER BY created_at DESC");
        if let (Some(page), Some(limit)) = (page, limit) {
            query.push(" LIMIT ");
            query.push_bind(limit as i64);
            query.push(" OFFSET ");
            query.push_bind(page_offset(page, limit));
        }
        let categories = query
            .build_query_as::<ProjectCategory>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM project_categories WHERE name ILIKE ");
        count.push_bind(&pattern);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((categories, total))
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ProjectCategory>, AppError> {
        sqlx::query_as::<_, ProjectCategory>("SELECT * FROM project_categories WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProjectCategory>, AppError> {
        sqlx::query_as::<_, ProjectCategory>("SELECT * FROM project_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<ProjectCategory>, AppError> {
        sqlx::query_as::<_, ProjectCategory>(
            "SELECT * FROM project_categories WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create(&self, uuid: &Uuid, name: &str) -> Result<ProjectCategory, AppError> {
        sqlx::query_as::<_, ProjectCategory>(
            "INSERT INTO project_categories (uuid, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(uuid)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<ProjectCategory, AppError> {
        sqlx::query_as::<_, ProjectCategory>(
            "UPDATE project_categories SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM project_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project category not found".to_string()));
        }
        Ok(())
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM project_categories WHERE name = ");
        query.push_bind(name);
        if let Some(id) = exclude_id {
            query.push(" AND id <> ");
            query.push_bind(id);
        }
        query.push(")");
        query
            .build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn project_count(&self, id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE project_category_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
