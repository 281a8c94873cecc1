use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::infrastructure::media::UploadedImage;

use super::{id_as_string, tag::{Tag, TagResponse}};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub slug: String,
    pub content: String,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ArticleInsert {
    pub uuid: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub slug: String,
    pub content: String,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
}

/// Full-replacement update set. The slug is resolved by the use case:
/// regenerated only when the title changed, otherwise the stored one.
#[derive(Debug)]
pub struct ArticleChanges {
    pub title: String,
    pub thumbnail: String,
    pub slug: String,
    pub content: String,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
}

// ───── Input ────────────────────────────────────────────────────────

/// Raw field values as they arrived; the validation layer decides which
/// absences are errors.
#[derive(Debug, Default)]
pub struct ArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub meta_desc: Option<String>,
    pub meta_keyword: Option<String>,
}

#[derive(Debug, MultipartForm)]
pub struct ArticleForm {
    // The field limit sits above MAX_IMAGE_BYTES so the size rule reports
    // through the validation list, not as a transport error.
    #[multipart(limit = "2MiB")]
    pub image: Option<TempFile>,
    pub title: Option<Text<String>>,
    pub content: Option<Text<String>>,
    pub tags: Option<Text<String>>,
    pub meta_desc: Option<Text<String>>,
    pub meta_keyword: Option<Text<String>>,
}

impl ArticleForm {
    pub fn into_parts(self) -> Result<(ArticleInput, Option<UploadedImage>), AppError> {
        let image = self.image.map(UploadedImage::from_temp_file).transpose()?;
        let input = ArticleInput {
            title: self.title.map(Text::into_inner),
            content: self.content.map(Text::into_inner),
            tags: self.tags.map(Text::into_inner),
            meta_desc: self.meta_desc.map(Text::into_inner),
            meta_keyword: self.meta_keyword.map(Text::into_inner),
        };
        Ok((input, image))
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub slug: String,
    pub content: String,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

impl ArticleResponse {
    pub fn from_parts(article: Article, tags: Vec<Tag>) -> Self {
        ArticleResponse {
            id: article.id,
            uuid: article.uuid,
            title: article.title,
            thumbnail: article.thumbnail,
            slug: article.slug,
            content: article.content,
            meta_desc: article.meta_desc,
            meta_keyword: article.meta_keyword,
            is_active: article.is_active,
            created_at: article.created_at,
            updated_at: article.updated_at,
            tags: tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}
