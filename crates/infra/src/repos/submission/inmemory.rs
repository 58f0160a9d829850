use super::ISubmissionRepo;
use crate::repos::shared::inmemory_repo::*;
use pensum_domain::{Submission, ID};

pub struct InMemorySubmissionRepo {
    submissions: std::sync::Mutex<Vec<Submission>>,
}

impl InMemorySubmissionRepo {
    pub fn new() -> Self {
        Self {
            submissions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubmissionRepo for InMemorySubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        insert(submission, &self.submissions);
        Ok(())
    }

    async fn save(&self, submission: &Submission) -> anyhow::Result<()> {
        save(submission, &self.submissions);
        Ok(())
    }

    async fn find_by_announcement_and_owner(
        &self,
        announcement_id: &ID,
        owner_id: &ID,
    ) -> Option<Submission> {
        let matches = find_by(&self.submissions, |submission| {
            submission.announcement_id == *announcement_id && submission.owner_id == *owner_id
        });
        matches.into_iter().next()
    }
}
