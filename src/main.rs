mod telemetry;

use plando_infra::setup_context;
use plando_jobs::start_job_schedulers;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("plando_jobs_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    info!(
        "Starting background jobs. Reminder tick: {}s, calendar sync tick: {}s",
        context.config.reminder_interval_secs, context.config.calendar_sync_interval_secs
    );
    start_job_schedulers(context);

    // The jobs run for the process lifetime; an in-flight tick is simply
    // abandoned on shutdown
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    Ok(())
}
