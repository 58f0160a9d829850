use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    Assignment,
    Test,
    GeneralNotice,
}

/// A posted assignment, test or notice, scoped to a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: ID,
    pub kind: AnnouncementKind,
    pub title: String,
    pub description: String,
    /// Raw due date text as stored. This is a calendar date, not an
    /// instant; only `date::to_calendar_date` may interpret it.
    pub due_date: Option<String>,
    pub subject_id: ID,
    pub subsubject_id: Option<ID>,
}

impl Entity for Announcement {
    fn id(&self) -> &ID {
        &self.id
    }
}
