mod telemetry;

use pensum_domain::ID;
use pensum_engine::{LogSystemNotifier, LogToastChannel, NotificationDispatcher, ReminderPoller};
use pensum_infra::setup_context;
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber};
use tracing::{info, warn};

/// Owner identity comes from the session provider; the daemon reads it
/// from the environment and falls back to a transient id.
fn get_owner_id() -> ID {
    match std::env::var("PENSUM_OWNER_ID") {
        Ok(raw) => match raw.parse::<ID>() {
            Ok(id) => id,
            Err(_) => {
                warn!(
                    "The given PENSUM_OWNER_ID: {} is not valid, using a transient owner id.",
                    raw
                );
                ID::new()
            }
        },
        Err(_) => ID::new(),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("pensum".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    let owner_id = get_owner_id();
    info!("Starting reminder poller for owner {}", owner_id);

    let dispatcher = NotificationDispatcher::new(
        context.clone(),
        Arc::new(LogSystemNotifier),
        Arc::new(LogToastChannel),
    );
    let poller = ReminderPoller::new(context, dispatcher, owner_id);
    let handle = poller.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutting down reminder poller");
    handle.stop().await;
    Ok(())
}
