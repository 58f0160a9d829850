use super::resolve::{resolve_link, NotificationPayload, ResolvedLink};
use crate::error::EngineError;
use crate::shared::usecase::UseCase;
use pensum_domain::{date, urgency, CalendarDate, Urgency, ID};
use pensum_infra::Context;
use serde::Serialize;
use tracing::warn;

/// Builds the notifications screen: every live reminder of the owner
/// whose linked date falls within `[today, today + window_days]`, split
/// by entity kind.
///
/// Pure read - repeated calls are idempotent, nothing is dispatched or
/// deleted here.
#[derive(Debug)]
pub struct ListUpcomingNotificationsUseCase {
    pub owner_id: ID,
    pub window_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingItem {
    pub payload: NotificationPayload,
    pub date: CalendarDate,
    pub days_until: i64,
    pub urgency: Urgency,
    /// Stricter notification-list boundary, distinct from `urgency`
    pub immediate: bool,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingNotifications {
    /// Assignments, tests and notices, ascending by due date
    pub announcements: Vec<UpcomingItem>,
    /// Schedule entries, ascending by start date
    pub schedule: Vec<UpcomingItem>,
}

impl UpcomingNotifications {
    /// Badge count shown next to the notifications icon
    pub fn count(&self) -> usize {
        self.announcements.len() + self.schedule.len()
    }
}

#[async_trait::async_trait]
impl UseCase for ListUpcomingNotificationsUseCase {
    type Response = UpcomingNotifications;

    type Errors = EngineError;

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let tz = ctx.config.timezone;
        let today = date::date_of_timestamp(ctx.sys.get_timestamp_millis(), &tz)
            .ok_or_else(|| EngineError::StoreQuery(anyhow::anyhow!("System clock is outside the calendar range")))?;

        let reminders = ctx
            .repos
            .reminders
            .find_by_owner(&self.owner_id)
            .await
            .map_err(EngineError::StoreQuery)?;

        let mut result = UpcomingNotifications::default();
        for reminder in reminders {
            let link = match resolve_link(&reminder, ctx).await {
                Ok(Some(link)) => link,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping unresolvable reminder: {:?}", e);
                    continue;
                }
            };

            // Anchor date of the linked entity, read as calendar
            // components - never by shifting an instant
            let anchor = match &link {
                ResolvedLink::Announcement(announcement) => match &announcement.due_date {
                    Some(raw) => match date::to_calendar_date(raw) {
                        Ok(due) => due,
                        Err(e) => {
                            warn!("Skipping reminder {} with unreadable due date: {}", reminder.id, e);
                            continue;
                        }
                    },
                    // Nothing to anchor a window on
                    None => continue,
                },
                ResolvedLink::Schedule(entry) => match date::date_of_timestamp(entry.start_ts, &tz) {
                    Some(start) => start,
                    None => continue,
                },
            };

            let days_until = date::days_until(&anchor, &today);
            if days_until < 0 || days_until > self.window_days {
                continue;
            }

            let item = UpcomingItem {
                payload: NotificationPayload::new(&reminder, &link, &tz),
                date: anchor,
                days_until,
                urgency: Urgency::from_days_until(days_until),
                immediate: urgency::is_immediate(days_until),
            };
            match link {
                ResolvedLink::Announcement(_) => result.announcements.push(item),
                ResolvedLink::Schedule(_) => result.schedule.push(item),
            }
        }

        result.announcements.sort_by_key(|item| item.date);
        result.schedule.sort_by_key(|item| item.date);
        Ok(result)
    }
}
