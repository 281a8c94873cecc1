use async_trait::async_trait;
use futures::future::try_join_all;
use sqlx::{Postgres, QueryBuilder};

use super::page_offset;
use super::sqlx_repo::SqlxArticleRepo;
use crate::domain::entities::article::{Article, ArticleChanges, ArticleInsert};
use crate::domain::entities::tag::Tag;
use crate::domain::identity;
use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Lists articles matching `search` by title, newest first, with total count.
    /// Pagination only applies when both `page` and `limit` are present.
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
        active_only: bool,
    ) -> Result<(Vec<Article>, i64), AppError>;

    async fn find_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Article>, AppError>;

    async fn create(&self, insert: &ArticleInsert) -> Result<Article, AppError>;

    async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<Article, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn set_active(&self, id: i64, active: bool) -> Result<(), AppError>;

    /// True when another article already uses `title`. Rows whose slug equals
    /// `exclude_slug` are ignored, so updates don't collide with themselves.
    async fn title_exists<'a>(
        &self,
        title: &str,
        exclude_slug: Option<&'a str>,
    ) -> Result<bool, AppError>;

    async fn tags_for(&self, article_id: i64) -> Result<Vec<Tag>, AppError>;

    async fn tags_for_many(&self, article_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError>;

    /// Replaces the article's tag set with `names`, creating missing tags.
    /// Returns the resolved tags in the order given.
    async fn replace_tags(&self, article_id: i64, names: &[String]) -> Result<Vec<Tag>, AppError>;
}

#[derive(sqlx::FromRow)]
struct ArticleTagRow {
    article_id: i64,
    #[sqlx(flatten)]
    tag: Tag,
}

impl SqlxArticleRepo {
    /// Each name resolves independently; a concurrent insert of the same name
    /// lands on the unique constraint and reuses the existing row.
    async fn upsert_tag(&self, name: &str) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (uuid, name) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING *",
        )
        .bind(identity::new_external_id())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepo {
    async fn list(
        &self,
        search: &str,
        page: Option<u32>,
        limit: Option<u32>,
        active_only: bool,
    ) -> Result<(Vec<Article>, i64), AppError> {
        let pattern = format!("%{search}%");

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM articles WHERE title ILIKE ");
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
        let articles = query
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles WHERE title ILIKE ");
        count.push_bind(&pattern);
        if active_only {
            count.push(" AND is_active = TRUE");
        }
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((articles, total))
    }

    async fn find_by_slug(&self, slug: &str, active_only: bool) -> Result<Option<Article>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM articles WHERE slug = ");
        query.push_bind(slug);
        if active_only {
            query.push(" AND is_active = TRUE");
        }
        query
            .build_query_as::<Article>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, insert: &ArticleInsert) -> Result<Article, AppError> {
        sqlx::query_as::<_, Article>(
            "INSERT INTO articles (uuid, title, thumbnail, slug, content, meta_desc, meta_keyword)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(insert.uuid)
        .bind(&insert.title)
        .bind(&insert.thumbnail)
        .bind(&insert.slug)
        .bind(&insert.content)
        .bind(&insert.meta_desc)
        .bind(&insert.meta_keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<Article, AppError> {
        sqlx::query_as::<_, Article>(
            "UPDATE articles
             SET title = $1, thumbnail = $2, slug = $3, content = $4,
                 meta_desc = $5, meta_keyword = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING *",
        )
        .bind(&changes.title)
        .bind(&changes.thumbnail)
        .bind(&changes.slug)
        .bind(&changes.content)
        .bind(&changes.meta_desc)
        .bind(&changes.meta_keyword)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Article not found".to_string()));
        }
        Ok(())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE articles SET is_active = $1, updated_at = NOW() WHERE id = $2")
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
            QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM articles WHERE title = ");
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

    async fn tags_for(&self, article_id: i64) -> Result<Vec<Tag>, AppError> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t
             JOIN article_tags at ON at.tag_id = t.id
             WHERE at.article_id = $1
             ORDER BY t.id",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn tags_for_many(&self, article_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError> {
        let rows = sqlx::query_as::<_, ArticleTagRow>(
            "SELECT at.article_id, t.* FROM tags t
             JOIN article_tags at ON at.tag_id = t.id
             WHERE at.article_id = ANY($1)
             ORDER BY t.id",
        )
        .bind(article_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| (r.article_id, r.tag)).collect())
    }

    async fn replace_tags(&self, article_id: i64, names: &[String]) -> Result<Vec<Tag>, AppError> {
        let tags = try_join_all(names.iter().map(|name| self.upsert_tag(name))).await?;

        // Drop-and-reinsert runs in one transaction so a failed reinsert
        // never leaves the article without its previous tag set.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await?;
        for tag in &tags {
            sqlx::query("INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2)")
                .bind(article_id)
                .bind(tag.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(tags)
    }
}
