use super::resolve::{resolve_link, NotificationPayload};
use crate::error::EngineError;
use crate::shared::usecase::UseCase;
use pensum_domain::{Reminder, ID};
use pensum_infra::Context;
use tracing::warn;

/// Finds all reminders of one owner firing at or before `horizon`,
/// resolved and ready for display.
///
/// The horizon is usually "now + lookahead", so the result may contain
/// rows that are pre-fetched but not yet due; the caller decides when to
/// actually show them.
#[derive(Debug)]
pub struct FindDueRemindersUseCase {
    pub owner_id: ID,
    /// Pre-fetch cutoff in millis, inclusive
    pub horizon: i64,
}

/// A live reminder paired with its display payload, ordered by fire time.
#[derive(Debug, Clone)]
pub struct DueReminder {
    pub reminder: Reminder,
    pub payload: NotificationPayload,
}

#[async_trait::async_trait]
impl UseCase for FindDueRemindersUseCase {
    type Response = Vec<DueReminder>;

    type Errors = EngineError;

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let reminders = ctx
            .repos
            .reminders
            .find_due(&self.owner_id, self.horizon)
            .await
            .map_err(EngineError::StoreQuery)?;

        let mut due = Vec::with_capacity(reminders.len());
        for reminder in reminders {
            let link = match resolve_link(&reminder, ctx).await {
                Ok(Some(link)) => link,
                // Already submitted, nothing to nag about
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping unresolvable reminder: {:?}", e);
                    continue;
                }
            };
            let payload = NotificationPayload::new(&reminder, &link, &ctx.config.timezone);
            due.push(DueReminder { reminder, payload });
        }

        due.sort_by_key(|d| d.reminder.fires_at);
        Ok(due)
    }
}
