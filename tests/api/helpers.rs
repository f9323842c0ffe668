use once_cell::sync::Lazy;
use serde_json::json;
use testinternals::configuration::get_configuration;
use testinternals::startup::Application;
use testinternals::telemetry::get_subscriber;
use testinternals::telemetry::init_subscriber;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

pub const ADMIN_EMAIL: &str = "admin@testinternals.test";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Logs are swallowed unless `TEST_LOG` is set:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are different types, hence the two arms
    match std::env::var("TEST_LOG") {
        Ok(_) => init_subscriber(get_subscriber("test", "debug", std::io::stdout)),
        Err(_) => init_subscriber(get_subscriber("test", "debug", std::io::sink)),
    }
    .expect("Failed to init test subscriber");
});

pub struct TestApp {
    /// `http://localhost:{port}`
    pub addr: String,
    /// Stands in for the identity provider
    pub identity_server: MockServer,
    /// Stands in for the document database
    pub store_server: MockServer,
    /// Keeps cookies, never follows redirects
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(
        &self,
        path: &str,
    ) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path}", self.addr))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_html(
        &self,
        path: &str,
    ) -> String {
        self.get(path).await.text().await.unwrap()
    }

    pub async fn post_form<Body: serde::Serialize>(
        &self,
        path: &str,
        body: &Body,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}{path}", self.addr))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_subscriptions(
        &self,
        email: &str,
    ) -> reqwest::Response {
        self.post_form("/subscriptions", &[("email", email)]).await
    }

    pub async fn post_login(
        &self,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post_form("/admin/login", &[("email", email), ("password", password)])
            .await
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/admin/logout", self.addr))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Make the identity provider accept `email` on sign-in
    pub async fn mock_sign_in(
        &self,
        email: &str,
    ) {
        Mock::given(method("POST"))
            .and(path("/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "user-1",
                "email": email,
                "displayName": "Site Admin",
                "idToken": "id-token",
            })))
            .mount(&self.identity_server)
            .await;
    }

    /// Answer exactly one sign-out request with `status`
    pub async fn mock_sign_out(
        &self,
        status: u16,
    ) {
        Mock::given(method("POST"))
            .and(path("/accounts:signOut"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.identity_server)
            .await;
    }

    /// Sign in as the allow-listed admin, leaving the session cookie in
    /// `api_client`
    pub async fn login_as_admin(&self) {
        self.mock_sign_in(ADMIN_EMAIL).await;
        let resp = self.post_login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        check_redirect(&resp, "/admin/dashboard");
    }
}

/// Spawn the app on a random port, with both external services mocked.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let identity_server = MockServer::start().await;
    let store_server = MockServer::start().await;

    let cfg = {
        let mut c = get_configuration().expect("Failed to read configuration");
        // the OS picks a free port
        c.application.port = 0;
        c.application.host = "127.0.0.1".to_string();
        c.application.base_url = "https://testinternals.test".to_string();
        c.identity.base_url = identity_server.uri();
        c.identity.admin_email = ADMIN_EMAIL.to_string();
        c.identity.timeout_ms = 2000;
        c.document_store.base_url = store_server.uri();
        c.document_store.timeout_ms = 2000;
        c
    };

    let app = Application::build(cfg).await.expect("Failed to build app");
    let port = app.get_port();
    // `localhost` rather than 127.0.0.1, so that the cookie store treats the
    // origin as secure
    let addr = format!("http://localhost:{port}");
    tokio::spawn(app.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        addr,
        identity_server,
        store_server,
        api_client,
    }
}

pub fn check_redirect(
    resp: &reqwest::Response,
    location: &str,
) {
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), location);
}
