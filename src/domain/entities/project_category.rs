use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id_as_string;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectCategory {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectCategoryPayload {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCategoryResponse {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectCategory> for ProjectCategoryResponse {
    fn from(category: ProjectCategory) -> Self {
        ProjectCategoryResponse {
            id: category.id,
            uuid: category.uuid,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
