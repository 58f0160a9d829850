use crate::error::EngineError;
use chrono::prelude::*;
use chrono_tz::Tz;
use pensum_domain::{
    date, Announcement, AnnouncementKind, Reminder, ReminderLink, ScheduleEntry, SubmissionStatus,
    ID,
};
use pensum_infra::Context;
use serde::Serialize;
use tracing::warn;

/// The store row a reminder points at.
#[derive(Debug, Clone)]
pub enum ResolvedLink {
    Announcement(Announcement),
    Schedule(ScheduleEntry),
}

/// Fetches the link target of `reminder` and applies the suppression
/// rule: a reminder on an assignment the owner has already submitted
/// resolves to `Ok(None)` and must not be shown anywhere.
///
/// Both the poller path and the notifications screen go through this
/// function so the two views can never disagree on what counts as live.
pub async fn resolve_link(
    reminder: &Reminder,
    ctx: &Context,
) -> Result<Option<ResolvedLink>, EngineError> {
    match &reminder.link {
        ReminderLink::Announcement(announcement_id) => {
            let announcement = ctx
                .repos
                .announcements
                .find(announcement_id)
                .await
                .ok_or_else(|| EngineError::MissingLink(reminder.id.clone()))?;

            if announcement.kind == AnnouncementKind::Assignment {
                let submission = ctx
                    .repos
                    .submissions
                    .find_by_announcement_and_owner(announcement_id, &reminder.owner_id)
                    .await;
                if let Some(submission) = submission {
                    if submission.status == SubmissionStatus::Submitted {
                        return Ok(None);
                    }
                }
            }

            Ok(Some(ResolvedLink::Announcement(announcement)))
        }
        ReminderLink::Schedule(entry_id) => {
            let entry = ctx
                .repos
                .schedule_entries
                .find(entry_id)
                .await
                .ok_or_else(|| EngineError::MissingLink(reminder.id.clone()))?;
            Ok(Some(ResolvedLink::Schedule(entry)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Assignment,
    Test,
    Notice,
    Schedule,
}

/// Everything both notification channels need to render a reminder,
/// assembled once so display code never touches the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub reminder_id: ID,
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
}

impl NotificationPayload {
    pub fn new(reminder: &Reminder, link: &ResolvedLink, tz: &Tz) -> Self {
        match link {
            ResolvedLink::Announcement(announcement) => Self::for_announcement(reminder, announcement),
            ResolvedLink::Schedule(entry) => Self::for_schedule_entry(reminder, entry, tz),
        }
    }

    fn for_announcement(reminder: &Reminder, announcement: &Announcement) -> Self {
        let category = match announcement.kind {
            AnnouncementKind::Assignment => NotificationCategory::Assignment,
            AnnouncementKind::Test => NotificationCategory::Test,
            AnnouncementKind::GeneralNotice => NotificationCategory::Notice,
        };

        let mut lines = Vec::new();
        if let Some(raw) = &announcement.due_date {
            // An unreadable due date degrades the body, not the whole
            // row: the reminder fires on fires_at, not on this text
            match date::to_calendar_date(raw) {
                Ok(due) => lines.push(format!("Due {}", date::format_human(&due))),
                Err(e) => warn!(
                    "Announcement {} has an unreadable due date: {}",
                    announcement.id, e
                ),
            }
        }
        if !announcement.description.is_empty() {
            lines.push(announcement.description.clone());
        }

        Self {
            reminder_id: reminder.id.clone(),
            title: announcement.title.clone(),
            body: lines.join("\n"),
            category,
        }
    }

    fn for_schedule_entry(reminder: &Reminder, entry: &ScheduleEntry, tz: &Tz) -> Self {
        let mut lines = Vec::new();
        if let Some(start) = Utc.timestamp_millis_opt(entry.start_ts).single() {
            lines.push(format!("Starts {}", start.with_timezone(tz).format("%H:%M")));
        }
        if !entry.description.is_empty() {
            lines.push(entry.description.clone());
        }

        Self {
            reminder_id: reminder.id.clone(),
            title: entry.title.clone(),
            body: lines.join("\n"),
            category: NotificationCategory::Schedule,
        }
    }
}
