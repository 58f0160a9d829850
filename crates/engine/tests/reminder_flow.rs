//! End-to-end flow: poll -> dual dispatch -> acknowledge -> delete.

use chrono::TimeZone;
use chrono_tz::Tz;
use pensum_domain::{Announcement, AnnouncementKind, Reminder, ID};
use pensum_engine::{
    Acknowledgment, ISystemNotifier, IToastChannel, NotificationDispatcher, NotificationPayload,
    NotificationPermission, ReminderPoller,
};
use pensum_infra::{Context, ISys};
use std::sync::{Arc, Mutex};

struct StaticTimeSys(i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

struct RecordingSystemNotifier {
    sent: Mutex<Vec<NotificationPayload>>,
}

#[async_trait::async_trait]
impl ISystemNotifier for RecordingSystemNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn request_permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingToastChannel {
    shown: Mutex<Vec<(NotificationPayload, Acknowledgment)>>,
}

#[async_trait::async_trait]
impl IToastChannel for RecordingToastChannel {
    async fn show(&self, payload: &NotificationPayload, ack: Acknowledgment) -> anyhow::Result<()> {
        self.shown.lock().unwrap().push((payload.clone(), ack));
        Ok(())
    }
}

fn ts(tz: &Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
    tz.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

#[tokio::test]
async fn reminder_is_delivered_acknowledged_and_deleted() {
    let tz: Tz = "Asia/Tokyo".parse().unwrap();
    let mut ctx = Context::create_inmemory();
    ctx.config.timezone = tz;
    ctx.sys = Arc::new(StaticTimeSys(ts(&tz, 2025, 1, 14, 9, 1)));

    // An assignment due tomorrow with a reminder that fired a minute ago
    let announcement = Announcement {
        id: Default::default(),
        kind: AnnouncementKind::Assignment,
        title: "Essay draft".into(),
        description: "Two pages minimum".into(),
        due_date: Some("2025-01-15".into()),
        subject_id: Default::default(),
        subsubject_id: None,
    };
    ctx.repos.announcements.insert(&announcement).await.unwrap();
    let owner_id: ID = Default::default();
    let reminder = Reminder::for_announcement(
        owner_id.clone(),
        announcement.id.clone(),
        ts(&tz, 2025, 1, 14, 9, 0),
    );
    ctx.repos.reminders.insert(&reminder).await.unwrap();

    let system = Arc::new(RecordingSystemNotifier {
        sent: Mutex::new(Vec::new()),
    });
    let toast = Arc::new(RecordingToastChannel::default());
    let dispatcher = NotificationDispatcher::new(ctx.clone(), system.clone(), toast.clone());
    let mut poller = ReminderPoller::new(ctx.clone(), dispatcher, owner_id);

    // First tick delivers on both channels
    poller.tick().await;
    assert_eq!(system.sent.lock().unwrap().len(), 1);
    let (payload, ack) = {
        let mut shown = toast.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        shown.pop().unwrap()
    };
    assert_eq!(payload.title, "Essay draft");
    assert_eq!(payload.reminder_id, reminder.id);

    // The user confirms the toast: the backing row is deleted
    ack.confirm().await;
    assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());

    // Later ticks have nothing left to deliver
    poller.tick().await;
    assert!(system.sent.lock().unwrap().len() == 1);
    assert!(toast.shown.lock().unwrap().is_empty());
}
