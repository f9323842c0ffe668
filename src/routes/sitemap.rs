use actix_web::http::header::ContentType;
use actix_web::web;
use actix_web::HttpResponse;

use crate::content::ContentStore;
use crate::sitemap::build_sitemap;
use crate::startup::AppBaseUrl;

/// `GET /sitemap.xml`, built from the configured public origin
pub async fn sitemap(
    store: web::Data<ContentStore>,
    base_url: web::Data<AppBaseUrl>,
) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::xml())
        .body(build_sitemap(&base_url.0, store.all_posts()))
}
