mod telemetry;

use bellman_core::start_reminder_dispatch_job;
use bellman_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("bellman".into(), "info".into());
    init_subscriber(subscriber);

    run_migration().await.expect("Migrations to run");

    let context = setup_context().await;
    start_reminder_dispatch_job(context);
    info!("Reminder dispatch job started");

    tokio::signal::ctrl_c().await
}
