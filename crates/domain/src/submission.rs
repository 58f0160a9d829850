use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Submitted,
}

/// Hand-in state of one owner for one assignment announcement. Used only
/// to suppress reminders and notifications for work that is already done.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: ID,
    pub announcement_id: ID,
    pub owner_id: ID,
    pub status: SubmissionStatus,
}

impl Submission {
    pub fn new(announcement_id: ID, owner_id: ID, status: SubmissionStatus) -> Self {
        Self {
            id: Default::default(),
            announcement_id,
            owner_id,
            status,
        }
    }
}

impl Entity for Submission {
    fn id(&self) -> &ID {
        &self.id
    }
}
