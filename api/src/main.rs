use anyhow::Context;
use telemetry::{get_subscriber, init_subscriber};
use waitlist_api::configuration::get_configuration;
use waitlist_api::startup::Application;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;

    let subscriber = get_subscriber(&configuration.telemetry, std::io::stdout);
    init_subscriber(subscriber);

    let application = Application::build(configuration).await?;

    application.run_until_stopped().await?;

    Ok(())
}
