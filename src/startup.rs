use std::net::TcpListener;

use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use secrecy::ExposeSecret;
use secrecy::Secret;
use tracing_actix_web::TracingLogger;

use crate::authentication::reject_non_admin_users;
use crate::authentication::AdminEmail;
use crate::configuration::Settings;
use crate::content::ContentStore;
use crate::document_store::DocumentStoreClient;
use crate::identity::IdentityClient;
use crate::routes::admin_dashboard;
use crate::routes::blog_index;
use crate::routes::blog_post;
use crate::routes::create_post;
use crate::routes::delete_post;
use crate::routes::edit_post_form;
use crate::routes::edit_post_redirect;
use crate::routes::export_subscribers;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::login;
use crate::routes::login_form;
use crate::routes::logout;
use crate::routes::new_post_form;
use crate::routes::new_post_redirect;
use crate::routes::newsletter_admin;
use crate::routes::remove_subscriber;
use crate::routes::sitemap;
use crate::routes::subscribe;
use crate::routes::update_post;

/// Wrapper for actix's `Server` with access to the bound port
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Validate the content set, build the service clients and bind the
    /// listener. Any failure here aborts startup.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener =
            TcpListener::bind(&addr).with_context(|| format!("Failed to bind to {addr}"))?;
        // port 0 means the OS picked one
        let port = listener.local_addr()?.port();

        let content = ContentStore::load_embedded().context("Embedded posts are invalid")?;
        tracing::info!(posts = content.all_posts().len(), "Loaded blog posts");

        let server = run(
            listener,
            content,
            cfg.identity.client()?,
            cfg.identity.admin_email(),
            cfg.document_store.client()?,
            cfg.application.base_url,
            cfg.application.hmac_secret,
            cfg.application.secure_cookies,
            cfg.application.static_dir,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Consumes `self`; await it last, or hand it to `tokio::spawn`
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// Public origin of the site (no trailing slash). Wrapped so that it cannot be
/// confused with other `String`s in app data.
pub struct AppBaseUrl(pub String);

/// Declares all endpoints. The server only listens on an already bound
/// listener.
#[allow(clippy::too_many_arguments)]
pub fn run(
    listener: TcpListener,
    content: ContentStore,
    identity: IdentityClient,
    admin_email: AdminEmail,
    document_store: DocumentStoreClient,
    base_url: String,
    hmac_secret: Secret<String>,
    secure_cookies: bool,
    static_dir: String,
) -> Result<Server, anyhow::Error> {
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .context("hmac_secret must be at least 64 bytes")?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    // `Data` is an `Arc`: one copy shared by every worker
    let content = Data::new(content);
    let identity = Data::new(identity);
    let admin_email = Data::new(admin_email);
    let document_store = Data::new(document_store);
    let base_url = Data::new(AppBaseUrl(base_url.trim_end_matches('/').to_string()));

    // the closure runs once per worker thread
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            // signed and encrypted; the whole session lives in the cookie
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/sitemap.xml", web::get().to(sitemap))
            .route("/subscriptions", web::post().to(subscribe))
            .route("/blog", web::get().to(blog_index))
            // before `/blog/{slug}`, which would otherwise claim them
            .route("/blog/new", web::get().to(new_post_redirect))
            .route("/blog/edit/{slug}", web::get().to(edit_post_redirect))
            .route("/blog/{slug}", web::get().to(blog_post))
            // outside the gated scope, and registered before it
            .route("/admin/login", web::get().to(login_form))
            .route("/admin/login", web::post().to(login))
            .service(
                web::scope("/admin")
                    .wrap(from_fn(reject_non_admin_users))
                    .route("/dashboard", web::get().to(admin_dashboard))
                    .route("/new-post", web::get().to(new_post_form))
                    .route("/new-post", web::post().to(create_post))
                    .route("/edit/{slug}", web::get().to(edit_post_form))
                    .route("/edit/{slug}", web::post().to(update_post))
                    .route("/edit/{slug}/delete", web::post().to(delete_post))
                    .route("/newsletter", web::get().to(newsletter_admin))
                    .route("/newsletter/export", web::get().to(export_subscribers))
                    .route("/newsletter/{id}/delete", web::post().to(remove_subscriber))
                    .route("/logout", web::post().to(logout)),
            )
            // last, so that it only sees paths no route above claimed
            .service(Files::new("/", &static_dir))
            .app_data(content.clone())
            .app_data(identity.clone())
            .app_data(admin_email.clone())
            .app_data(document_store.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
