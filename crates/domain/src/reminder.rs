use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The entity a `Reminder` is set on. Exactly one target per reminder -
/// the variant carries the foreign key, so a reminder with both or
/// neither link cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ReminderLink {
    /// An assignment, test or general notice
    Announcement(ID),
    /// An entry in the weekly schedule grid
    Schedule(ID),
}

/// A scheduled notification intent owned by a single user.
///
/// A `Reminder` is live from creation until its row is deleted, which
/// happens when the owner acknowledges the delivered notification. If it
/// is never deleted it will fire again in a later session.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The user that set the reminder and will be notified
    pub owner_id: ID,
    /// The timestamp in millis at which the reminder becomes due
    pub fires_at: i64,
    pub link: ReminderLink,
}

impl Reminder {
    pub fn for_announcement(owner_id: ID, announcement_id: ID, fires_at: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            fires_at,
            link: ReminderLink::Announcement(announcement_id),
        }
    }

    pub fn for_schedule_entry(owner_id: ID, schedule_entry_id: ID, fires_at: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            fires_at,
            link: ReminderLink::Schedule(schedule_entry_id),
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
