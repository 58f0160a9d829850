mod inmemory;

pub use inmemory::InMemoryAnnouncementRepo;
use pensum_domain::{Announcement, ID};

#[async_trait::async_trait]
pub trait IAnnouncementRepo: Send + Sync {
    async fn insert(&self, announcement: &Announcement) -> anyhow::Result<()>;
    async fn find(&self, announcement_id: &ID) -> Option<Announcement>;
    async fn delete(&self, announcement_id: &ID) -> Option<Announcement>;
}

#[cfg(test)]
mod tests {
    use crate::Context;
    use pensum_domain::{Announcement, AnnouncementKind};

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = Context::create_inmemory();
        let announcement = Announcement {
            id: Default::default(),
            kind: AnnouncementKind::Assignment,
            title: "Algebra worksheet".into(),
            description: "p. 34-36".into(),
            due_date: Some("2025-01-15".into()),
            subject_id: Default::default(),
            subsubject_id: None,
        };

        assert!(ctx.repos.announcements.insert(&announcement).await.is_ok());
        let found = ctx.repos.announcements.find(&announcement.id).await;
        assert_eq!(found, Some(announcement.clone()));

        let deleted = ctx.repos.announcements.delete(&announcement.id).await;
        assert_eq!(deleted, Some(announcement.clone()));
        assert!(ctx.repos.announcements.find(&announcement.id).await.is_none());
    }
}
