mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    IAnnouncementRepo, IReminderRepo, IScheduleEntryRepo, ISubmissionRepo,
    InMemoryAnnouncementRepo, InMemoryReminderRepo, InMemoryScheduleEntryRepo,
    InMemorySubmissionRepo, Repos,
};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl Context {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> Context {
    Context::create_inmemory()
}
