use crate::shared::entity::{Entity, ID};

/// A cell of the weekly schedule grid materialized as a stored row with
/// absolute start/end instants. The grid position is recovered through
/// `slot::period_of_timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub description: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub subject_id: Option<ID>,
}

impl Entity for ScheduleEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
