use actix_web::web;

use crate::interfaces::handlers::tags;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(tags::list_tags)
        .service(tags::get_tag)
        .service(tags::create_tag)
        .service(tags::update_tag)
        .service(tags::delete_tag);
}
