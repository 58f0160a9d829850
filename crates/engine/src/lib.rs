mod error;
pub mod notification;
mod shared;

pub use error::EngineError;
pub use notification::dispatcher::{
    Acknowledgment, ISystemNotifier, IToastChannel, LogSystemNotifier, LogToastChannel,
    NotificationDispatcher, NotificationPermission,
};
pub use notification::find_due_reminders::{DueReminder, FindDueRemindersUseCase};
pub use notification::list_upcoming::{
    ListUpcomingNotificationsUseCase, UpcomingItem, UpcomingNotifications,
};
pub use notification::poller::{PollerHandle, ReminderPoller};
pub use notification::{NotificationCategory, NotificationPayload};
pub use shared::usecase::{execute, UseCase};
