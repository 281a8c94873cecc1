use uuid::Uuid;

use super::{ListParams, ListResult};
use crate::domain::entities::tag::{Tag, TagPayload, TagResponse};
use crate::domain::identity;
use crate::domain::validation::FormValidator;
use crate::errors::AppError;
use crate::interfaces::repositories::tag::TagRepository;

pub struct TagHandler<R> {
    repo: R,
}

impl<R: TagRepository> TagHandler<R> {
    pub fn new(repo: R) -> Self {
        TagHandler { repo }
    }

    pub async fn list(&self, params: &ListParams) -> Result<ListResult<TagResponse>, AppError> {
        let (tags, total) = self
            .repo
            .list(&params.search, params.page, params.limit)
            .await?;
        let items = tags.into_iter().map(TagResponse::from).collect();
        Ok(ListResult { items, total })
    }

    pub async fn get(&self, uuid: &str) -> Result<TagResponse, AppError> {
        let tag = self.require(uuid).await?;
        Ok(TagResponse::from(tag))
    }

    pub async fn create(&self, payload: TagPayload) -> Result<TagResponse, AppError> {
        let name = self.validate(&payload, None).await?;
        let tag = self.repo.create(&identity::new_external_id(), &name).await?;
        Ok(TagResponse::from(tag))
    }

    pub async fn update(&self, uuid: &str, payload: TagPayload) -> Result<TagResponse, AppError> {
        let current = self.require(uuid).await?;
        let name = self.validate(&payload, Some(current.id)).await?;
        let tag = self.repo.update_name(current.id, &name).await?;
        Ok(TagResponse::from(tag))
    }

    pub async fn delete(&self, uuid: &str) -> Result<(), AppError> {
        let current = self.require(uuid).await?;
        self.repo.delete(current.id).await
    }

    async fn require(&self, uuid: &str) -> Result<Tag, AppError> {
        let not_found = || AppError::NotFound("Tag not found".to_string());
        let uuid = Uuid::parse_str(uuid).map_err(|_| not_found())?;
        self.repo.find_by_uuid(&uuid).await?.ok_or_else(not_found)
    }

    async fn validate(
        &self,
        payload: &TagPayload,
        exclude_id: Option<i64>,
    ) -> Result<String, AppError> {
        let mut v = FormValidator::new();
        let name = v.required("name", payload.name.as_deref(), "Name");
        v.min_length("name", name, 2, "Name");
        v.max_length("name", name, 255, "Name");
        if let Some(name) = name {
            if self.repo.name_exists(name, exclude_id).await? {
                v.push("name", "Name already exists");
            }
        }
        v.finish()?;
        name.map(str::to_owned)
            .ok_or_else(|| AppError::InternalError("validated tag input was incomplete".into()))
    }
}
