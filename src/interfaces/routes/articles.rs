use actix_web::web;

use crate::interfaces::handlers::articles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // The status route registers before the slug route so "status" is never
    // swallowed as a slug.
    cfg.service(articles::toggle_article_status)
        .service(articles::list_articles)
        .service(articles::list_articles_front)
        .service(articles::get_article_front)
        .service(articles::get_article)
        .service(articles::create_article)
        .service(articles::update_article)
        .service(articles::delete_article);
}
