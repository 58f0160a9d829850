pub mod dispatcher;
pub mod find_due_reminders;
pub mod list_upcoming;
pub mod poller;
mod resolve;

pub use resolve::{NotificationCategory, NotificationPayload};
