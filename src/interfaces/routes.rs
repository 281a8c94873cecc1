use actix_web::web;

use crate::interfaces::handlers::{envelope, home::home};

mod articles;
mod auth;
mod certificates;
mod payload_error;
mod project_categories;
mod projects;
mod tags;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(articles::config_routes)
            .configure(projects::config_routes)
            .configure(project_categories::config_routes)
            .configure(tags::config_routes)
            .configure(certificates::config_routes),
    );

    cfg.configure(payload_error::config_routes);

    cfg.default_service(web::route().to(|| async { envelope::not_found_default() }));
}
