use testinternals::configuration::get_configuration;
use testinternals::startup::Application;
use testinternals::telemetry::get_subscriber;
use testinternals::telemetry::init_subscriber;

/// Initialise telemetry, load config, and serve until stopped
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("testinternals", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;
    let app = Application::build(cfg).await?;
    tracing::info!(port = app.get_port(), "Server started");
    app.run_until_stopped().await?;
    Ok(())
}
