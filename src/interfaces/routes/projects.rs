use actix_web::web;

use crate::interfaces::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(projects::toggle_project_status)
        .service(projects::list_projects)
        .service(projects::list_projects_front)
        .service(projects::get_project_front)
        .service(projects::get_project)
        .service(projects::create_project)
        .service(projects::update_project)
        .service(projects::delete_project);
}
