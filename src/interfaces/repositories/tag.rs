use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::page_offset;
use super::sqlx_repo::SqlxTagRepo;
use crate::domain::entities::tag::Tag;
use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<Tag>, i64), AppError>;

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Tag>, AppError>;

    async fn create(&self, uuid: &Uuid, name: &str) -> Result<Tag, AppError>;

    async fn update_name(&self, id: i64, name: &str) -> Result<Tag, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError>;
}

#[async_trait]
impl TagRepository for SqlxTagRepo {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<Tag>, i64), AppError> {
        let pattern = format!("%{search}%");

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM tags WHERE name ILIKE ");
        query.push_bind(&pattern);
        query.push(" ORDER BY created_at DESC");
        if let (Some(page), Some(limit)) = (page, limit) {
            query.push(" LIMIT ");
            query.push_bind(limit as i64);
            query.push(" OFFSET ");
            query.push_bind(page_offset(page, limit));
        }
        let tags = query.build_query_as::<Tag>().fetch_all(&self.pool).await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM tags WHERE name ILIKE ");
        count.push_bind(&pattern);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((tags, total))
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Tag>, AppError> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, uuid: &Uuid, name: &str) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (uuid, name) VALUES ($1, $2) RETURNING *")
            .bind(uuid)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }
        Ok(())
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM tags WHERE name = ");
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
}
