use super::find_due_reminders::DueReminder;
use super::resolve::NotificationPayload;
use crate::error::EngineError;
use pensum_domain::ID;
use pensum_infra::Context;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Undecided,
    Granted,
    Denied,
}

/// System-level notification surface (OS / browser), gated by a
/// permission the user may never grant.
#[async_trait::async_trait]
pub trait ISystemNotifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;

    /// Asks the runtime for permission. Implementations must treat this
    /// as a no-op when the permission is already decided.
    async fn request_permission(&self) -> NotificationPermission;

    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()>;
}

/// In-app toast surface. Always available - this is the channel that
/// carries the confirm action, and it stays visible until acted on.
#[async_trait::async_trait]
pub trait IToastChannel: Send + Sync {
    async fn show(&self, payload: &NotificationPayload, ack: Acknowledgment) -> anyhow::Result<()>;
}

/// The confirm action handed to the toast. Confirming consumes it, so a
/// reminder can be acknowledged at most once per display.
pub struct Acknowledgment {
    reminder_id: ID,
    ctx: Context,
}

impl Acknowledgment {
    pub fn reminder_id(&self) -> &ID {
        &self.reminder_id
    }

    /// Dismisses the notification by deleting its backing reminder row.
    ///
    /// A failed delete is logged and not retried: the session dedup set
    /// already holds this id, so the user will not see the reminder
    /// again until a future session re-surfaces it.
    pub async fn confirm(self) {
        match self.ctx.repos.reminders.delete(&self.reminder_id).await {
            Ok(Some(_)) => info!("Reminder {} acknowledged and deleted", self.reminder_id),
            Ok(None) => warn!(
                "Reminder {} was already gone when acknowledged",
                self.reminder_id
            ),
            Err(e) => error!(
                "{}",
                EngineError::Deletion {
                    reminder_id: self.reminder_id.clone(),
                    source: e,
                }
            ),
        }
    }
}

/// Fans one due reminder out to both channels.
#[derive(Clone)]
pub struct NotificationDispatcher {
    ctx: Context,
    system: Arc<dyn ISystemNotifier>,
    toast: Arc<dyn IToastChannel>,
}

impl NotificationDispatcher {
    pub fn new(
        ctx: Context,
        system: Arc<dyn ISystemNotifier>,
        toast: Arc<dyn IToastChannel>,
    ) -> Self {
        Self { ctx, system, toast }
    }

    pub async fn request_permission(&self) {
        if self.system.permission() == NotificationPermission::Undecided {
            self.system.request_permission().await;
        }
    }

    /// Shows `due` on both channels. A denied or undecided permission
    /// silently degrades to toast-only; channel errors are logged and
    /// never bubble up into the poller loop.
    pub async fn dispatch(&self, due: &DueReminder) {
        if self.system.permission() == NotificationPermission::Granted {
            if let Err(e) = self.system.notify(&due.payload).await {
                warn!("System notification failed: {:?}", e);
            }
        }

        let ack = Acknowledgment {
            reminder_id: due.reminder.id.clone(),
            ctx: self.ctx.clone(),
        };
        if let Err(e) = self.toast.show(&due.payload, ack).await {
            error!("Toast channel failed: {:?}", e);
        }
    }
}

/// Channel impls for the daemon: everything goes to the log. The toast
/// "stays on screen" by simply never confirming, which is exactly the
/// unacknowledged-toast semantics - the reminder row stays live.
pub struct LogSystemNotifier;

#[async_trait::async_trait]
impl ISystemNotifier for LogSystemNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn request_permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        info!("[system] {}: {}", payload.title, payload.body);
        Ok(())
    }
}

pub struct LogToastChannel;

#[async_trait::async_trait]
impl IToastChannel for LogToastChannel {
    async fn show(&self, payload: &NotificationPayload, ack: Acknowledgment) -> anyhow::Result<()> {
        info!(
            "[toast] {}: {} (confirm to dismiss reminder {})",
            payload.title,
            payload.body,
            ack.reminder_id()
        );
        Ok(())
    }
}
