use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::page_offset;
use super::sqlx_repo::SqlxProjectRepo;
use crate::domain::entities::project::{Project, ProjectChanges, ProjectInsert};
use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
        active_only: bool,
    ) -> Result<(Vec<Project>, i64), AppError>;

    async fn find_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Project>, AppError>;

    async fn create(&self, insert: &ProjectInsert) -> Result<Project, AppError>;

    async fn update(&self, id: i64, changes: &ProjectChanges) -> Result<Project, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn set_active(&self, id: i64, active: bool) -> Result<(), AppError>;

    async fn title_exists<'a>(
        &self,
        title: &str,
        exclude_slug: Option<&'a str>,
    ) -> Result<bool, AppError>;
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
        active_only: bool,
    ) -> Result<(Vec<Project>, i64), AppError> {
        let pattern = format!("%{search}%");

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM projects WHERE title ILIKE ");
        query.push_bind(&pattern);
        if active_only {
            query.push(" AND is_active = TRUE");
        }
        query.push(" ORDER BY created_at DESC");
        if let (Some(page), Some(limit)) = (page, limit) {
            query.push(" LIMIT ");
            query.push_bind(limit as i64);
            query.push(" OFFSET ");
            query.push_bind(page_offset(page, limit));
        }
        let projects = query
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE title ILIKE ");
        count.push_bind(&pattern);
        if active_only {
            count.push(" AND is_active = TRUE");
        }
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((projects, total))
    }

    async fn find_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Project>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM projects WHERE slug = ");
        query.push_bind(slug);
        if active_only {
            query.push(" AND is_active = TRUE");
        }
        query
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (uuid, project_category_id, title, slug, image, description,
                                   stack, link_github, link_project, link_documentation,
                                   meta_desc, meta_keyword)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(insert.uuid)
        .bind(insert.project_category_id)
        .bind(&insert.title)
        .bind(&insert.slug)
        .bind(&insert.image)
        .bind(&insert.description)
        .bind(&insert.stack)
        .bind(&insert.link_github)
        .bind(&insert.link_project)
        .bind(&insert.link_documentation)
        .bind(&insert.meta_desc)
        .bind(&insert.meta_keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, id: i64, changes: &ProjectChanges) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects
             SET project_category_id = $1, title = $2, slug = $3, image = $4, description = $5,
                 stack = $6, link_github = $7, link_project = $8, link_documentation = $9,
                 meta_desc = $10, meta_keyword = $11, updated_at = NOW()
             WHERE id = $12
             RETURNING *",
        )
        .bind(changes.project_category_id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.image)
        .bind(&changes.description)
        .bind(&changes.stack)
        .bind(&changes.link_github)
        .bind(&changes.link_project)
        .bind(&changes.link_documentation)
        .bind(&changes.meta_desc)
        .bind(&changes.meta_keyword)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE projects SET is_active = $1, updated_at = NOW() WHERE id = $2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn title_exists<'a>(
        &self,
        title: &str,
        exclude_slug: Option<&'a str>,
    ) -> Result<bool, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM projects WHERE title = ");
        query.push_bind(title);
        if let Some(slug) = exclude_slug {
            query.push(" AND slug <> ");
            query.push_bind(slug);
        }
        query.push(")");
        query
            .build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
