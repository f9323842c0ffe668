use actix_web::HttpResponse;

/// `GET /health_check`
///
/// 200 with an empty body; `curl -v` to see it
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
