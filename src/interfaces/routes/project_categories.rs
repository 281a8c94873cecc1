use actix_web::web;

use crate::interfaces::handlers::project_categories;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(project_categories::list_project_categories)
        .service(project_categories::get_project_category)
        .service(project_categories::create_project_category)
        .service(project_categories::update_project_category)
        .service(project_categories::delete_project_category);
}
