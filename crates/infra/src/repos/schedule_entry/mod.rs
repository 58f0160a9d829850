mod inmemory;

pub use inmemory::InMemoryScheduleEntryRepo;
use pensum_domain::{ScheduleEntry, ID};

#[async_trait::async_trait]
pub trait IScheduleEntryRepo: Send + Sync {
    async fn insert(&self, entry: &ScheduleEntry) -> anyhow::Result<()>;
    async fn find(&self, entry_id: &ID) -> Option<ScheduleEntry>;
    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<ScheduleEntry>>;
    async fn delete(&self, entry_id: &ID) -> Option<ScheduleEntry>;
}
