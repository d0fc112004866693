use korfball_tracker::api;
use korfball_tracker::common::init;
use korfball_tracker::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "migrate" => init::run_migrations(settings).await,
        component => anyhow::bail!("Unknown app component: {component}"),
    }
}
