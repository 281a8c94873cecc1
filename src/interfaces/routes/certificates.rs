use actix_web::web;

use crate::interfaces::handlers::certificates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(certificates::list_certificates)
        .service(certificates::list_certificates_front)
        .service(certificates::get_certificate)
        .service(certificates::create_certificate)
        .service(certificates::update_certificate)
        .service(certificates::delete_certificate);
}
