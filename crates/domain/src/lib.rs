mod announcement;
pub mod date;
mod reminder;
mod schedule_entry;
mod shared;
pub mod slot;
mod submission;
mod timespan;
pub mod urgency;

pub use announcement::{Announcement, AnnouncementKind};
pub use date::{CalendarDate, InvalidDateError};
pub use reminder::{Reminder, ReminderLink};
pub use schedule_entry::ScheduleEntry;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use slot::WeekDay;
pub use submission::{Submission, SubmissionStatus};
pub use timespan::TimeSpan;
pub use urgency::Urgency;
