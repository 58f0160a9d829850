use super::IScheduleEntryRepo;
use crate::repos::shared::inmemory_repo::*;
use pensum_domain::{ScheduleEntry, ID};

pub struct InMemoryScheduleEntryRepo {
    entries: std::sync::Mutex<Vec<ScheduleEntry>>,
}

impl InMemoryScheduleEntryRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleEntryRepo for InMemoryScheduleEntryRepo {
    async fn insert(&self, entry: &ScheduleEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> Option<ScheduleEntry> {
        find(entry_id, &self.entries)
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<ScheduleEntry>> {
        let res = find_by(&self.entries, |entry| entry.owner_id == *owner_id);
        Ok(res)
    }

    async fn delete(&self, entry_id: &ID) -> Option<ScheduleEntry> {
        delete(entry_id, &self.entries)
    }
}
