pub mod constants;
pub mod domain;
pub mod errors;
pub mod graceful_shutdown;
pub mod infrastructure;
pub mod interfaces;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{auth as auth_infra, db, media};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth_infra::jwt::JwtService;
use media::MediaStore;
use repositories::sqlx_repo::{
    SqlxArticleRepo, SqlxCertificateRepo, SqlxProjectCategoryRepo, SqlxProjectRepo, SqlxTagRepo,
    SqlxUserRepo,
};
use use_cases::articles::ArticleHandler;
use use_cases::auth::AuthHandler;
use use_cases::certificates::CertificateHandler;
use use_cases::project_categories::ProjectCategoryHandler;
use use_cases::projects::ProjectHandler;
use use_cases::tags::TagHandler;

pub type AppAuthHandler = AuthHandler<SqlxUserRepo>;
pub type AppArticleHandler = ArticleHandler<SqlxArticleRepo>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, SqlxProjectCategoryRepo>;
pub type AppCategoryHandler = ProjectCategoryHandler<SqlxProjectCategoryRepo>;
pub type AppTagHandler = TagHandler<SqlxTagRepo>;
pub type AppCertificateHandler = CertificateHandler<SqlxCertificateRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub article_handler: AppArticleHandler,
    pub project_handler: AppProjectHandler,
    pub category_handler: AppCategoryHandler,
    pub tag_handler: AppTagHandler,
    pub certificate_handler: AppCertificateHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let media = MediaStore::new(&config.upload_dir);

        AppState {
            auth_handler: AuthHandler::new(
                SqlxUserRepo::new(pool.clone()),
                JwtService::new(config),
            ),
            article_handler: ArticleHandler::new(
                SqlxArticleRepo::new(pool.clone()),
                media.clone(),
            ),
            project_handler: ProjectHandler::new(
                SqlxProjectRepo::new(pool.clone()),
                SqlxProjectCategoryRepo::new(pool.clone()),
                media,
            ),
            category_handler: ProjectCategoryHandler::new(SqlxProjectCategoryRepo::new(
                pool.clone(),
            )),
            tag_handler: TagHandler::new(SqlxTagRepo::new(pool.clone())),
            certificate_handler: CertificateHandler::new(SqlxCertificateRepo::new(pool)),
        }
    }
}
