use std::collections::HashMap;

use super::{check_image, ListParams, ListResult};
use crate::domain::entities::project::{
    Project, ProjectChanges, ProjectInput, ProjectInsert, ProjectResponse,
};
use crate::domain::entities::project_category::ProjectCategory;
use crate::domain::identity;
use crate::domain::validation::FormValidator;
use crate::errors::AppError;
use crate::infrastructure::media::{MediaStore, UploadedImage};
use crate::interfaces::repositories::project::ProjectRepository;
use crate::interfaces::repositories::project_category::ProjectCategoryRepository;

const MEDIA_DIR: &str = "projects";

pub struct ProjectHandler<R, C> {
    repo: R,
    categories: C,
    media: MediaStore,
}

/// Validated project fields, with the category row already resolved.
struct ValidatedProject {
    category: ProjectCategory,
    image: Option<UploadedImage>,
}

impl<R: ProjectRepository, C: ProjectCategoryRepository> ProjectHandler<R, C> {
    pub fn new(repo: R, categories: C, media: MediaStore) -> Self {
        ProjectHandler { repo, categories, media }
    }

    pub async fn list(
        &self,
        params: &ListParams,
        active_only: bool,
    ) -> Result<ListResult<ProjectResponse>, AppError> {
        let (projects, total) = self
            .repo
            .list(&params.search, params.page, params.limit, active_only)
            .await?;
        if projects.is_empty() {
            return Ok(ListResult { items: Vec::new(), total });
        }

        let mut ids: Vec<i64> = projects.iter().map(|p| p.project_category_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let categories: HashMap<i64, ProjectCategory> = self
            .categories
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut items = Vec::with_capacity(projects.len());
        for project in projects {
            let category = categories
                .get(&project.project_category_id)
                .cloned()
                .ok_or_else(|| {
                    AppError::DatabaseError(format!(
                        "project {} references missing category {}",
                        project.id, project.project_category_id
                    ))
                })?;
            items.push(ProjectResponse::from_parts(project, category));
        }
        Ok(ListResult { items, total })
    }

    pub async fn get(&self, slug: &str) -> Result<ProjectResponse, AppError> {
        let project = self.require(slug).await?;
        self.with_category(project).await
    }

    pub async fn get_front(&self, slug: &str) -> Result<Option<ProjectResponse>, AppError> {
        let Some(project) = self.repo.find_by_slug(slug, true).await? else {
            return Ok(None);
        };
        Ok(Some(self.with_category(project).await?))
    }

    pub async fn create(
        &self,
        input: ProjectInput,
        image: Option<UploadedImage>,
    ) -> Result<ProjectResponse, AppError> {
        let validated = self.validate(&input, image, true, None).await?;

        let ProjectInput {
            title,
            description,
            stack,
            link_github,
            link_project,
            link_documentation,
            meta_desc,
            meta_keyword,
            ..
        } = input;
        let (Some(title), Some(description), Some(stack), Some(meta_desc), Some(image)) =
            (title, description, stack, meta_desc, validated.image)
        else {
            return Err(AppError::InternalError(
                "validated project input was incomplete".into(),
            ));
        };

        let stored_image = self.media.store(MEDIA_DIR, &image).await?;
        let insert = ProjectInsert {
            uuid: identity::new_external_id(),
            project_category_id: validated.category.id,
            slug: identity::unique_slug(&title),
            title,
            image: stored_image.clone(),
            description,
            stack,
            link_github,
            link_project,
            link_documentation,
            meta_desc,
            meta_keyword,
        };
        let project = match self.repo.create(&insert).await {
            Ok(project) => project,
            Err(err) => {
                self.media.discard(&stored_image).await;
                return Err(err);
            }
        };
        Ok(ProjectResponse::from_parts(project, validated.category))
    }

    pub async fn update(
        &self,
        slug: &str,
        input: ProjectInput,
        image: Option<UploadedImage>,
    ) -> Result<ProjectResponse, AppError> {
        let validated = self.validate(&input, image, false, Some(slug)).await?;
        let current = self.require(slug).await?;

        let ProjectInput {
            title,
            description,
            stack,
            link_github,
            link_project,
            link_documentation,
            meta_desc,
            meta_keyword,
            ..
        } = input;
        let (Some(title), Some(description), Some(stack), Some(meta_desc)) =
            (title, description, stack, meta_desc)
        else {
            return Err(AppError::InternalError(
                "validated project input was incomplete".into(),
            ));
        };

        let new_image = match &validated.image {
            Some(image) => Some(self.media.store(MEDIA_DIR, image).await?),
            None => None,
        };
        let slug_value = if title == current.title {
            current.slug.clone()
        } else {
            identity::unique_slug(&title)
        };
        let changes = ProjectChanges {
            project_category_id: validated.category.id,
            image: new_image.clone().unwrap_or_else(|| current.image.clone()),
            slug: slug_value,
            title,
            description,
            stack,
            link_github,
            link_project,
            link_documentation,
            meta_desc,
            meta_keyword,
        };
        let project = match self.repo.update(current.id, &changes).await {
            Ok(project) => project,
            Err(err) => {
                if let Some(path) = &new_image {
                    self.media.discard(path).await;
                }
                return Err(err);
            }
        };
        if new_image.is_some() {
            self.media.discard(&current.image).await;
        }
        Ok(ProjectResponse::from_parts(project, validated.category))
    }

    pub async fn delete(&self, slug: &str) -> Result<(), AppError> {
        let current = self.require(slug).await?;
        self.repo.delete(current.id).await?;
        self.media.remove(&current.image).await?;
        Ok(())
    }

    pub async fn toggle_status(&self, slug: &str) -> Result<(), AppError> {
        let current = self.require(slug).await?;
        self.repo.set_active(current.id, !current.is_active).await
    }

    async fn require(&self, slug: &str) -> Result<Project, AppError> {
        self.repo
            .find_by_slug(slug, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    async fn with_category(&self, project: Project) -> Result<ProjectResponse, AppError> {
        let category = self
            .categories
            .find_by_id(project.project_category_id)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(format!(
                    "project {} references missing category {}",
                    project.id, project.project_category_id
                ))
            })?;
        Ok(ProjectResponse::from_parts(project, category))
    }

    async fn validate(
        &self,
        input: &ProjectInput,
        image: Option<UploadedImage>,
        image_required: bool,
        exclude_slug: Option<&str>,
    ) -> Result<ValidatedProject, AppError> {
        let mut v = FormValidator::new();
        let category_raw = v.required(
            "project_category_id",
            input.project_category_id.as_deref(),
            "Project category id",
        );
        let category_id = v.numeric("project_category_id", category_raw, "Project category id");
        let title = v.required("title", input.title.as_deref(), "Title");
        v.min_length("title", title, 2, "Title");
        v.max_length("title", title, 255, "Title");
        let description = v.required("description", input.description.as_deref(), "Description");
        v.min_length("description", description, 2, "Description");
        let stack = v.required("stack", input.stack.as_deref(), "Stack");
        v.min_length("stack", stack, 2, "Stack");
        v.max_length("stack", stack, 255, "Stack");
        v.url("link_github", input.link_github.as_deref(), "Github link");
        v.url("link_project", input.link_project.as_deref(), "Project link");
        v.url(
            "link_documentation",
            input.link_documentation.as_deref(),
            "Documentation link",
        );
        let meta_desc = v.required("meta_desc", input.meta_desc.as_deref(), "Meta description");
        v.min_length("meta_desc", meta_desc, 2, "Meta description");
        v.max_length("meta_desc", meta_desc, 255, "Meta description");
        v.min_length("meta_keyword", input.meta_keyword.as_deref(), 2, "Meta keyword");
        v.max_length("meta_keyword", input.meta_keyword.as_deref(), 255, "Meta keyword");
        let image = check_image(&mut v, image, image_required);

        let mut category = None;
        if let Some(id) = category_id {
            match self.categories.find_by_id(id).await? {
                Some(found) => category = Some(found),
                None => v.push("project_category_id", "Project category does not exist"),
            }
        }
        if let Some(title) = title {
            if self.repo.title_exists(title, exclude_slug).await? {
                v.push("title", "Title already exists");
            }
        }
        v.finish()?;

        let Some(category) = category else {
            return Err(AppError::InternalError(
                "validated project input was incomplete".into(),
            ));
        };
        Ok(ValidatedProject { category, image })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::interfaces::repositories::project::MockProjectRepository;
    use crate::interfaces::repositories::project_category::MockProjectCategoryRepository;

    fn temp_media() -> MediaStore {
        MediaStore::new(std::env::temp_dir().join(format!("projects-uc-{}", Uuid::new_v4())))
    }

    fn tiny_png_upload() -> UploadedImage {
        let img = image::RgbImage::new(2, 2);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        UploadedImage {
            data: out.into_inner(),
            file_name: "cover.png".to_string(),
        }
    }

    fn category(id: i64) -> ProjectCategory {
        ProjectCategory {
            id,
            uuid: Uuid::new_v4(),
            name: "Backend".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn full_input() -> ProjectInput {
        ProjectInput {
            project_category_id: Some("3".to_string()),
            title: Some("Inventory Service".to_string()),
            description: Some("Stock tracking".to_string()),
            stack: Some("Rust, Postgres".to_string()),
            link_github: Some("https://github.com/x/inventory".to_string()),
            link_project: None,
            link_documentation: None,
            meta_desc: Some("Inventory".to_string()),
            meta_keyword: None,
        }
    }

    #[actix_rt::test]
    async fn create_rejects_non_numeric_category_id() {
        let repo = MockProjectRepository::new();
        let mut categories = MockProjectCategoryRepository::new();
        categories.expect_find_by_id().never();
        let handler = ProjectHandler::new(repo, categories, temp_media());

        let mut input = full_input();
        input.project_category_id = Some("backend".to_string());
        input.title = None;
        let err = handler.create(input, None).await.unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["project_category_id", "title", "image"]);
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn create_rejects_unknown_category() {
        let mut repo = MockProjectRepository::new();
        repo.expect_title_exists().returning(|_, _| Ok(false));
        let mut categories = MockProjectCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));
        let handler = ProjectHandler::new(repo, categories, temp_media());

        let err = handler
            .create(full_input(), Some(tiny_png_upload()))
            .await
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.message == "Project category does not exist"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn create_nests_the_category_in_the_response() {
        let mut repo = MockProjectRepository::new();
        repo.expect_title_exists().returning(|_, _| Ok(false));
        repo.expect_create().returning(|insert| {
            Ok(Project {
                id: 11,
                uuid: insert.uuid,
                project_category_id: insert.project_category_id,
                title: insert.title.clone(),
                image: insert.image.clone(),
                slug: insert.slug.clone(),
                description: insert.description.clone(),
                stack: insert.stack.clone(),
                link_github: insert.link_github.clone(),
                link_project: insert.link_project.clone(),
                link_documentation: insert.link_documentation.clone(),
                is_active: true,
                meta_desc: insert.meta_desc.clone(),
                meta_keyword: insert.meta_keyword.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });
        let mut categories = MockProjectCategoryRepository::new();
        categories
            .expect_find_by_id()
            .withf(|id| *id == 3)
            .returning(|id| Ok(Some(category(id))));
        let handler = ProjectHandler::new(repo, categories, temp_media());

        let response = handler
            .create(full_input(), Some(tiny_png_upload()))
            .await
            .unwrap();
        assert_eq!(response.project_category.name, "Backend");
        assert!(response.image.starts_with("images/projects/"));
        assert!(response.slug.starts_with("inventory-service-"));
    }

    #[actix_rt::test]
    async fn get_maps_missing_slug_to_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_slug().returning(|_, _| Ok(None));
        let categories = MockProjectCategoryRepository::new();
        let handler = ProjectHandler::new(repo, categories, temp_media());

        let err = handler.get("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Project not found"));
    }
}
