mod inmemory;

pub use inmemory::InMemorySubmissionRepo;
use pensum_domain::{Submission, ID};

#[async_trait::async_trait]
pub trait ISubmissionRepo: Send + Sync {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()>;
    async fn save(&self, submission: &Submission) -> anyhow::Result<()>;
    async fn find_by_announcement_and_owner(
        &self,
        announcement_id: &ID,
        owner_id: &ID,
    ) -> Option<Submission>;
}

#[cfg(test)]
mod tests {
    use crate::Context;
    use pensum_domain::{Submission, SubmissionStatus};

    #[tokio::test]
    async fn create_and_update_status() {
        let ctx = Context::create_inmemory();
        let mut submission = Submission::new(
            Default::default(),
            Default::default(),
            SubmissionStatus::Pending,
        );

        assert!(ctx.repos.submissions.insert(&submission).await.is_ok());
        let found = ctx
            .repos
            .submissions
            .find_by_announcement_and_owner(&submission.announcement_id, &submission.owner_id)
            .await
            .unwrap();
        assert_eq!(found.status, SubmissionStatus::Pending);

        submission.status = SubmissionStatus::Submitted;
        assert!(ctx.repos.submissions.save(&submission).await.is_ok());
        let found = ctx
            .repos
            .submissions
            .find_by_announcement_and_owner(&submission.announcement_id, &submission.owner_id)
            .await
            .unwrap();
        assert_eq!(found.status, SubmissionStatus::Submitted);

        // Unknown pairs are simply absent
        let missing = ctx
            .repos
            .submissions
            .find_by_announcement_and_owner(&Default::default(), &submission.owner_id)
            .await;
        assert!(missing.is_none());
    }
}
