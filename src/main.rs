use anyhow::Context;
use iaroute_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load iaroute settings")?;
    iaroute_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.name,
        "iaroute-app schema bootstrap starting"
    );

    let report = iaroute_app::bootstrap(&settings).await?;

    tracing::info!(
        collections = report.collections.len(),
        created = report.created_count(),
        "iaroute-app schema bootstrap complete"
    );
    Ok(())
}
