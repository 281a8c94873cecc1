use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::infrastructure::media::UploadedImage;

use super::{id_as_string, project_category::{ProjectCategory, ProjectCategoryResponse}};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub uuid: Uuid,
    pub project_category_id: i64,
    pub title: String,
    pub image: String,
    pub slug: String,
    pub description: String,
    pub stack: String,
    pub link_github: Option<String>,
    pub link_project: Option<String>,
    pub link_documentation: Option<String>,
    pub is_active: bool,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub uuid: Uuid,
    pub project_category_id: i64,
    pub title: String,
    pub image: String,
    pub slug: String,
    pub description: String,
    pub stack: String,
    pub link_github: Option<String>,
    pub link_project: Option<String>,
    pub link_documentation: Option<String>,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
}

#[derive(Debug)]
pub struct ProjectChanges {
    pub project_category_id: i64,
    pub title: String,
    pub image: String,
    pub slug: String,
    pub description: String,
    pub stack: String,
    pub link_github: Option<String>,
    pub link_project: Option<String>,
    pub link_documentation: Option<String>,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
}

// ───── Input ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ProjectInput {
    pub project_category_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub stack: Option<String>,
    pub link_github: Option<String>,
    pub link_project: Option<String>,
    pub link_documentation: Option<String>,
    pub meta_desc: Option<String>,
    pub meta_keyword: Option<String>,
}

#[derive(Debug, MultipartForm)]
pub struct ProjectForm {
    // The field limit sits above MAX_IMAGE_BYTES so the size rule reports
    // through the validation list, not as a transport error.
    #[multipart(limit = "2MiB")]
    pub image: Option<TempFile>,
    pub project_category_id: Option<Text<String>>,
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub stack: Option<Text<String>>,
    pub link_github: Option<Text<String>>,
    pub link_project: Option<Text<String>>,
    pub link_documentation: Option<Text<String>>,
    pub meta_desc: Option<Text<String>>,
    pub meta_keyword: Option<Text<String>>,
}

impl ProjectForm {
    pub fn into_parts(self) -> Result<(ProjectInput, Option<UploadedImage>), AppError> {
        let image = self.image.map(UploadedImage::from_temp_file).transpose()?;
        let input = ProjectInput {
            project_category_id: self.project_category_id.map(Text::into_inner),
            title: self.title.map(Text::into_inner),
            description: self.description.map(Text::into_inner),
            stack: self.stack.map(Text::into_inner),
            link_github: self.link_github.map(Text::into_inner),
            link_project: self.link_project.map(Text::into_inner),
            link_documentation: self.link_documentation.map(Text::into_inner),
            meta_desc: self.meta_desc.map(Text::into_inner),
            meta_keyword: self.meta_keyword.map(Text::into_inner),
        };
        Ok((input, image))
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uuid: Uuid,
    #[serde(serialize_with = "id_as_string")]
    pub project_category_id: i64,
    pub title: String,
    pub image: String,
    pub slug: String,
    pub description: String,
    pub stack: String,
    pub link_github: Option<String>,
    pub link_project: Option<String>,
    pub link_documentation: Option<String>,
    pub is_active: bool,
    pub meta_desc: String,
    pub meta_keyword: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "ProjectCategory")]
    pub project_category: ProjectCategoryResponse,
}

impl ProjectResponse {
    pub fn from_parts(project: Project, category: ProjectCategory) -> Self {
        ProjectResponse {
            id: project.id,
            uuid: project.uuid,
            project_category_id: project.project_category_id,
            title: project.title,
            image: project.image,
            slug: project.slug,
            description: project.description,
            stack: project.stack,
            link_github: project.link_github,
            link_project: project.link_project,
            link_documentation: project.link_documentation,
            is_active: project.is_active,
            meta_desc: project.meta_desc,
            meta_keyword: project.meta_keyword,
            created_at: project.created_at,
            updated_at: project.updated_at,
            project_category: ProjectCategoryResponse::from(category),
        }
    }
}
