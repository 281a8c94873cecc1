use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::page_offset;
use super::sqlx_repo::SqlxCertificateRepo;
use crate::domain::entities::certificate::{Certificate, CertificateInsert};
use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<Certificate>, i64), AppError>;

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Certificate>, AppError>;

    async fn create(&self, insert: &CertificateInsert) -> Result<Certificate, AppError>;

    async fn update(&self, id: i64, insert: &CertificateInsert) -> Result<Certificate, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError>;
}

#[async_trait]
impl CertificateRepository for SqlxCertificateRepo {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(Vec<Certificate>, i64), AppError> {
        let pattern = format!("%{search}%");

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM certificates WHERE name ILIKE ");
        query.push_bind(&pattern);
        query.push(" ORDER BY created_at DESC");
        if let (Some(page), Some(limit)) = (page, limit) {
            query.push(" LIMIT ");
            query.push_bind(limit as i64);
            query.push(" OFFSET ");
            query.push_bind(page_offset(page, limit));
        }
        let certificates = query
            .build_query_as::<Certificate>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM certificates WHERE name ILIKE ");
        count.push_bind(&pattern);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((certificates, total))
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Certificate>, AppError> {
        sqlx::query_as::<_, Certificate>("SELECT * FROM certificates WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, insert: &CertificateInsert) -> Result<Certificate, AppError> {
        sqlx::query_as::<_, Certificate>(
            "INSERT INTO certificates (uuid, name, organization, month_obtained, year_obtained,
                                       month_expired, year_expired, url, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(insert.uuid)
        .bind(&insert.name)
        .bind(&insert.organization)
        .bind(&insert.month_obtained)
        .bind(&insert.year_obtained)
        .bind(&insert.month_expired)
        .bind(&insert.year_expired)
        .bind(&insert.url)
        .bind(&insert.description)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, id: i64, insert: &CertificateInsert) -> Result<Certificate, AppError> {
        sqlx::query_as::<_, Certificate>(
            "UPDATE certificates
             SET name = $1, organization = $2, month_obtained = $3, year_obtained = $4,
                 month_expired = $5, year_expired = $6, url = $7, description = $8,
                 updated_at = NOW()
             WHERE id = $9
             RETURNING *",
        )
        .bind(&insert.name)
        .bind(&insert.organization)
        .bind(&insert.month_obtained)
        .bind(&insert.year_obtained)
        .bind(&insert.month_expired)
        .bind(&insert.year_expired)
        .bind(&insert.url)
        .bind(&insert.description)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Certificate not found".to_string()));
        }
        Ok(())
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM certificates WHERE name = ");
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
