use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id_as_string;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dedicated tag endpoint body. All fields optional so the validation
/// layer can report presence failures itself.
#[derive(Debug, Default, Deserialize)]
pub struct TagPayload {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        TagResponse {
            id: tag.id,
            uuid: tag.uuid,
            name: tag.name,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_id_serializes_as_string() {
        let tag = Tag {
            id: 9007199254740993,
            uuid: Uuid::new_v4(),
            name: "rust".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(TagResponse::from(tag)).unwrap();
        assert_eq!(value["id"], "9007199254740993");
        assert!(value["createdAt"].is_string());
    }
}
