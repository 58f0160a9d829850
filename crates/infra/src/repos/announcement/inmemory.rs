use super::IAnnouncementRepo;
use crate::repos::shared::inmemory_repo::*;
use pensum_domain::{Announcement, ID};

pub struct InMemoryAnnouncementRepo {
    announcements: std::sync::Mutex<Vec<Announcement>>,
}

impl InMemoryAnnouncementRepo {
    pub fn new() -> Self {
        Self {
            announcements: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAnnouncementRepo for InMemoryAnnouncementRepo {
    async fn insert(&self, announcement: &Announcement) -> anyhow::Result<()> {
        insert(announcement, &self.announcements);
        Ok(())
    }

    async fn find(&self, announcement_id: &ID) -> Option<Announcement> {
        find(announcement_id, &self.announcements)
    }

    async fn delete(&self, announcement_id: &ID) -> Option<Announcement> {
        delete(announcement_id, &self.announcements)
    }
}
