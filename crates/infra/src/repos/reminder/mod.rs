mod inmemory;

pub use inmemory::InMemoryReminderRepo;
use pensum_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All reminders of `owner_id` firing at or before `before`
    async fn find_due(&self, owner_id: &ID, before: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}
