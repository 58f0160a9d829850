mod announcement;
mod reminder;
mod schedule_entry;
mod shared;
mod submission;

pub use announcement::{IAnnouncementRepo, InMemoryAnnouncementRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo};
pub use schedule_entry::{IScheduleEntryRepo, InMemoryScheduleEntryRepo};
use std::sync::Arc;
pub use submission::{ISubmissionRepo, InMemorySubmissionRepo};

/// The store contract: one queryable table per aggregate. The real
/// backing store lives on the other side of these traits; lookups may
/// return `None` (a row vanished between queries) without that being
/// fatal to any caller.
#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub announcements: Arc<dyn IAnnouncementRepo>,
    pub schedule_entries: Arc<dyn IScheduleEntryRepo>,
    pub submissions: Arc<dyn ISubmissionRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            announcements: Arc::new(InMemoryAnnouncementRepo::new()),
            schedule_entries: Arc::new(InMemoryScheduleEntryRepo::new()),
            submissions: Arc::new(InMemorySubmissionRepo::new()),
        }
    }
}
