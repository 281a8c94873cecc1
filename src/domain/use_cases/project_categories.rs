use uuid::Uuid;

use super::{ListParams, ListResult};
use crate::domain::entities::project_category::{
    ProjectCategory, ProjectCategoryPayload, ProjectCategoryResponse,
};
use crate::domain::identity;
use crate::domain::validation::FormValidator;
use crate::errors::AppError;
use crate::interfaces::repositories::project_category::ProjectCategoryRepository;

pub struct ProjectCategoryHandler<R> {
    repo: R,
}

impl<R: ProjectCategoryRepository> ProjectCategoryHandler<R> {
    pub fn new(repo: R) -> Self {
        ProjectCategoryHandler { repo }
    }

    pub async fn list(
        &self,
        params: &ListParams,
    ) -> Result<ListResult<ProjectCategoryResponse>, AppError> {
        let (categories, total) = self
            .repo
            .list(&params.search, params.page, params.limit)
            .await?;
        let items = categories
            .into_iter()
            .map(ProjectCategoryResponse::from)
            .collect();
        Ok(ListResult { items, total })
    }

    pub async fn get(&self, uuid: &str) -> Result<ProjectCategoryResponse, AppError> {
        let category = self.require(uuid).await?;
        Ok(ProjectCategoryResponse::from(category))
    }

    pub async fn create(
        &self,
        payload: ProjectCategoryPayload,
    ) -> Result<ProjectCategoryResponse, AppError> {
        let name = self.validate(&payload, None).await?;
        let category = self.repo.create(&identity::new_external_id(), &name).await?;
        Ok(ProjectCategoryResponse::from(category))
    }

    pub async fn update(
        &self,
        uuid: &str,
        payload: ProjectCategoryPayload,
    ) -> Result<ProjectCategoryResponse, AppError> {
        let current = self.require(uuid).await?;
        let name = self.validate(&payload, Some(current.id)).await?;
        let category = self.repo.update_name(current.id, &name).await?;
        Ok(ProjectCategoryResponse::from(category))
    }

    /// Deleting a category that projects still reference is refused with a
    /// conflict, never cascaded.
    pub async fn delete(&self, uuid: &str) -> Result<(), AppError> {
        let current = self.require(uuid).await?;
        if self.repo.project_count(current.id).await? > 0 {
            return Err(AppError::Conflict(
                "Project category is still used by projects".to_string(),
            ));
        }
        self.repo.delete(current.id).await
    }

    async fn require(&self, uuid: &str) -> Result<ProjectCategory, AppError> {
        let not_found = || AppError::NotFound("Project category not found".to_string());
        let uuid = Uuid::parse_str(uuid).map_err(|_| not_found())?;
        self.repo.find_by_uuid(&uuid).await?.ok_or_else(not_found)
    }

    async fn validate(
        &self,
        payload: &ProjectCategoryPayload,
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
        name.map(str::to_owned).ok_or_else(|| {
            AppError::InternalError("validated category input was incomplete".into())
        })
    }
}
