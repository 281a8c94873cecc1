use std::collections::HashMap;

use super::{check_image, ListParams, ListResult};
use crate::domain::entities::article::{
    Article, ArticleChanges, ArticleInput, ArticleInsert, ArticleResponse,
};
use crate::domain::identity;
use crate::domain::validation::{parse_tag_names, FormValidator};
use crate::errors::AppError;
use crate::infrastructure::media::{MediaStore, UploadedImage};
use crate::interfaces::repositories::article::ArticleRepository;

const MEDIA_DIR: &str = "articles";

/// Article write path: ordered validation, slug minting, image persistence
/// and the tag-set replacement all live here so handlers stay thin.
pub struct ArticleHandler<R> {
    repo: R,
    media: MediaStore,
}

impl<R: ArticleRepository> ArticleHandler<R> {
    pub fn new(repo: R, media: MediaStore) -> Self {
        ArticleHandler { repo, media }
    }

    pub async fn list(
        &self,
        params: &ListParams,
        active_only: bool,
    ) -> Result<ListResult<ArticleResponse>, AppError> {
        let (articles, total) = self
            .repo
            .list(&params.search, params.page, params.limit, active_only)
            .await?;
        if articles.is_empty() {
            return Ok(ListResult { items: Vec::new(), total });
        }

        let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        let mut tags_by_article: HashMap<i64, Vec<_>> = HashMap::new();
        for (article_id, tag) in self.repo.tags_for_many(&ids).await? {
            tags_by_article.entry(article_id).or_default().push(tag);
        }

        let items = articles
            .into_iter()
            .map(|article| {
                let tags = tags_by_article.remove(&article.id).unwrap_or_default();
                ArticleResponse::from_parts(article, tags)
            })
            .collect();
        Ok(ListResult { items, total })
    }

    pub async fn get(&self, slug: &str) -> Result<ArticleResponse, AppError> {
        let article = self.require(slug).await?;
        let tags = self.repo.tags_for(article.id).await?;
        Ok(ArticleResponse::from_parts(article, tags))
    }

    /// Public lookup. Inactive and unknown slugs both come back as `None`;
    /// the handler renders that as a 200 with null data.
    pub async fn get_front(&self, slug: &str) -> Result<Option<ArticleResponse>, AppError> {
        let Some(article) = self.repo.find_by_slug(slug, true).await? else {
            return Ok(None);
        };
        let tags = self.repo.tags_for(article.id).await?;
        Ok(Some(ArticleResponse::from_parts(article, tags)))
    }

    pub async fn create(
        &self,
        input: ArticleInput,
        image: Option<UploadedImage>,
    ) -> Result<ArticleResponse, AppError> {
        let image = self.validate(&input, image, true, None).await?;

        let ArticleInput { title, content, tags, meta_desc, meta_keyword } = input;
        let (Some(title), Some(content), Some(tags_raw), Some(meta_desc), Some(image)) =
            (title, content, tags, meta_desc, image)
        else {
            return Err(AppError::InternalError(
                "validated article input was incomplete".into(),
            ));
        };

        // The file is only written once every field check has passed.
        let thumbnail = self.media.store(MEDIA_DIR, &image).await?;
        let insert = ArticleInsert {
            uuid: identity::new_external_id(),
            slug: identity::unique_slug(&title),
            title,
            thumbnail: thumbnail.clone(),
            content,
            meta_desc,
            meta_keyword,
        };
        let article = match self.repo.create(&insert).await {
            Ok(article) => article,
            Err(err) => {
                self.media.discard(&thumbnail).await;
                return Err(err);
            }
        };

        let names = parse_tag_names(&tags_raw);
        let tag_rows = self.repo.replace_tags(article.id, &names).await?;
        Ok(ArticleResponse::from_parts(article, tag_rows))
    }

    pub async fn update(
        &self,
        slug: &str,
        input: ArticleInput,
        image: Option<UploadedImage>,
    ) -> Result<ArticleResponse, AppError> {
        let image = self.validate(&input, image, false, Some(slug)).await?;
        let current = self.require(slug).await?;

        let ArticleInput { title, content, tags, meta_desc, meta_keyword } = input;
        let (Some(title), Some(content), Some(tags_raw), Some(meta_desc)) =
            (title, content, tags, meta_desc)
        else {
            return Err(AppError::InternalError(
                "validated article input was incomplete".into(),
            ));
        };

        let new_thumbnail = match &image {
            Some(image) => Some(self.media.store(MEDIA_DIR, image).await?),
            None => None,
        };
        // The slug is kept stable unless the title actually changed.
        let slug_value = if title == current.title {
            current.slug.clone()
        } else {
            identity::unique_slug(&title)
        };
        let changes = ArticleChanges {
            thumbnail: new_thumbnail
                .clone()
                .unwrap_or_else(|| current.thumbnail.clone()),
            slug: slug_value,
            title,
            content,
            meta_desc,
            meta_keyword,
        };
        let article = match self.repo.update(current.id, &changes).await {
            Ok(article) => article,
            Err(err) => {
                if let Some(path) = &new_thumbnail {
                    self.media.discard(path).await;
                }
                return Err(err);
            }
        };
        if new_thumbnail.is_some() {
            self.media.discard(&current.thumbnail).await;
        }

        let names = parse_tag_names(&tags_raw);
        let tag_rows = self.repo.replace_tags(article.id, &names).await?;
        Ok(ArticleResponse::from_parts(article, tag_rows))
    }

    pub async fn delete(&self, slug: &str) -> Result<(), AppError> {
        let current = self.require(slug).await?;
        self.repo.delete(current.id).await?;
        self.media.remove(&current.thumbnail).await?;
        Ok(())
    }

    pub async fn toggle_status(&self, slug: &str) -> Result<(), AppError> {
        let current = self.require(slug).await?;
        self.repo.set_active(current.id, !current.is_active).await
    }

    async fn require(&self, slug: &str) -> Result<Article, AppError> {
        self.repo
            .find_by_slug(slug, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    async fn validate(
        &self,
        input: &ArticleInput,
        image: Option<UploadedImage>,
        image_required: bool,
        exclude_slug: Option<&str>,
    ) -> Result<Option<UploadedImage>, AppError> {
        let mut v = FormValidator::new();
        let title = v.required("title", input.title.as_deref(), "Title");
        v.min_length("title", title, 2, "Title");
        v.max_length("title", title, 255, "Title");
        let content = v.required("content", input.content.as_deref(), "Content");
        v.min_length("content", content, 2, "Content");
        v.required("tags", input.tags.as_deref(), "Tag");
        let meta_desc = v.required("meta_desc", input.meta_desc.as_deref(), "Meta description");
        v.min_length("meta_desc", meta_desc, 2, "Meta description");
        v.max_length("meta_desc", meta_desc, 255, "Meta description");
        v.min_length("meta_keyword", input.meta_keyword.as_deref(), 2, "Meta keyword");
        v.max_length("meta_keyword", input.meta_keyword.as_deref(), 255, "Meta keyword");
        let image = check_image(&mut v, image, image_required);

        if let Some(title) = title {
            if self.repo.title_exists(title, exclude_slug).await? {
                v.push("title", "Title already exists");
            }
        }
        v.finish()?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::entities::tag::Tag;
    use crate::interfaces::repositories::article::MockArticleRepository;

    fn temp_media() -> MediaStore {
        MediaStore::new(std::env::temp_dir().join(format!("articles-uc-{}", Uuid::new_v4())))
    }

    fn tiny_png_upload() -> UploadedImage {
        let img = image::RgbImage::new(2, 2);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        UploadedImage {
            data: out.into_inner(),
            file_name: "thumb.png".to_string(),
        }
    }

    fn stored_article(slug: &str, active: bool) -> Article {
        Article {
            id: 7,
            uuid: Uuid::new_v4(),
            title: "Writing Services".to_string(),
            thumbnail: "images/articles/1700000000000.png".to_string(),
            slug: slug.to_string(),
            content: "Body".to_string(),
            meta_desc: "Desc".to_string(),
            meta_keyword: None,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn full_input() -> ArticleInput {
        ArticleInput {
            title: Some("Writing Services".to_string()),
            content: Some("A long body".to_string()),
            tags: Some("go,go,rust".to_string()),
            meta_desc: Some("Meta".to_string()),
            meta_keyword: None,
        }
    }

    #[actix_rt::test]
    async fn create_collects_every_missing_field() {
        let repo = MockArticleRepository::new();
        let handler = ArticleHandler::new(repo, temp_media());

        let err = handler
            .create(ArticleInput::default(), None)
            .await
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "content", "tags", "meta_desc", "image"]);
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn create_rejects_duplicate_title_without_writing_anything() {
        let mut repo = MockArticleRepository::new();
        repo.expect_title_exists()
            .withf(|title, exclude| title == "Writing Services" && exclude.is_none())
            .returning(|_, _| Ok(true));
        let media = temp_media();
        let root = media.root().to_path_buf();
        let handler = ArticleHandler::new(repo, media);

        let err = handler
            .create(full_input(), Some(tiny_png_upload()))
            .await
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.iter().any(|e| e.message == "Title already exists"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
        assert!(!root.join("images").join("articles").exists());
    }

    #[actix_rt::test]
    async fn create_stores_image_and_replaces_deduplicated_tags() {
        let mut repo = MockArticleRepository::new();
        repo.expect_title_exists().returning(|_, _| Ok(false));
        repo.expect_create().returning(|insert| {
            let mut article = stored_article(&insert.slug, true);
            article.title = insert.title.clone();
            article.thumbnail = insert.thumbnail.clone();
            Ok(article)
        });
        repo.expect_replace_tags()
            .withf(|id, names| *id == 7 && names == ["go", "rust"])
            .returning(|_, names| {
                Ok(names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Tag {
                        id: i as i64 + 1,
                        uuid: Uuid::new_v4(),
                        name: name.clone(),
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    })
                    .collect())
            });
        let handler = ArticleHandler::new(repo, temp_media());

        let response = handler
            .create(full_input(), Some(tiny_png_upload()))
            .await
            .unwrap();
        assert!(response.thumbnail.starts_with("images/articles/"));
        assert!(response.slug.starts_with("writing-services-"));
        let names: Vec<&str> = response.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["go", "rust"]);
    }

    #[actix_rt::test]
    async fn get_maps_missing_slug_to_not_found() {
        let mut repo = MockArticleRepository::new();
        repo.expect_find_by_slug().returning(|_, _| Ok(None));
        let handler = ArticleHandler::new(repo, temp_media());

        let err = handler.get("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Article not found"));
    }

    #[actix_rt::test]
    async fn front_get_turns_missing_into_none() {
        let mut repo = MockArticleRepository::new();
        repo.expect_find_by_slug()
            .withf(|_, active_only| *active_only)
            .returning(|_, _| Ok(None));
        let handler = ArticleHandler::new(repo, temp_media());

        assert!(handler.get_front("hidden").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn toggle_flips_the_current_state() {
        let mut repo = MockArticleRepository::new();
        repo.expect_find_by_slug()
            .returning(|slug, _| Ok(Some(stored_article(slug, true))));
        repo.expect_set_active()
            .withf(|id, active| *id == 7 && !*active)
            .returning(|_, _| Ok(()));
        let handler = ArticleHandler::new(repo, temp_media());

        handler.toggle_status("writing-services").await.unwrap();
    }

    #[actix_rt::test]
    async fn toggling_twice_restores_the_original_state() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let active = Arc::new(AtomicBool::new(true));
        let mut repo = MockArticleRepository::new();
        let read = Arc::clone(&active);
        repo.expect_find_by_slug()
            .returning(move |slug, _| Ok(Some(stored_article(slug, read.load(Ordering::SeqCst)))));
        let write = Arc::clone(&active);
        repo.expect_set_active().returning(move |_, value| {
            write.store(value, Ordering::SeqCst);
            Ok(())
        });
        let handler = ArticleHandler::new(repo, temp_media());

        handler.toggle_status("writing-services").await.unwrap();
        assert!(!active.load(Ordering::SeqCst));
        handler.toggle_status("writing-services").await.unwrap();
        assert!(active.load(Ordering::SeqCst));
    }

    #[actix_rt::test]
    async fn delete_removes_the_thumbnail_and_later_reads_are_not_found() {
        let media = temp_media();
        let thumb = media.root().join("images/articles/1700000000000.png");
        std::fs::create_dir_all(thumb.parent().unwrap()).unwrap();
        std::fs::write(&thumb, b"stored bytes").unwrap();

        let mut seq = mockall::Sequence::new();
        let mut repo = MockArticleRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|slug, _| Ok(Some(stored_article(slug, true))));
        repo.expect_delete()
            .withf(|id| *id == 7)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));
        let handler = ArticleHandler::new(repo, media);

        handler.delete("writing-services-123").await.unwrap();
        assert!(!thumb.exists());

        let err = handler.get("writing-services-123").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Article not found"));
    }

    #[actix_rt::test]
    async fn update_regenerates_slug_when_title_changes() {
        let mut repo = MockArticleRepository::new();
        repo.expect_title_exists().returning(|_, _| Ok(false));
        repo.expect_find_by_slug()
            .returning(|slug, _| Ok(Some(stored_article(slug, true))));
        repo.expect_update()
            .withf(|id, changes| *id == 7 && changes.slug.starts_with("updated-services-"))
            .returning(|_, changes| {
                let mut article = stored_article(&changes.slug, true);
                article.title = changes.title.clone();
                Ok(article)
            });
        repo.expect_replace_tags().returning(|_, _| Ok(Vec::new()));
        let handler = ArticleHandler::new(repo, temp_media());

        let mut input = full_input();
        input.title = Some("Updated Services".to_string());
        let response = handler
            .update("writing-services-123", input, None)
            .await
            .unwrap();
        assert_ne!(response.slug, "writing-services-123");
        assert!(response.slug.starts_with("updated-services-"));
    }

    #[actix_rt::test]
    async fn update_keeps_slug_when_title_is_unchanged() {
        let mut repo = MockArticleRepository::new();
        repo.expect_title_exists().returning(|_, _| Ok(false));
        repo.expect_find_by_slug()
            .returning(|slug, _| Ok(Some(stored_article(slug, true))));
        repo.expect_update()
            .withf(|id, changes| *id == 7 && changes.slug == "writing-services-123")
            .returning(|_, changes| {
                let mut article = stored_article(&changes.slug, true);
                article.title = changes.title.clone();
                Ok(article)
            });
        repo.expect_replace_tags().returning(|_, _| Ok(Vec::new()));
        let handler = ArticleHandler::new(repo, temp_media());

        let response = handler
            .update("writing-services-123", full_input(), None)
            .await
            .unwrap();
        assert_eq!(response.slug, "writing-services-123");
    }
}
