use super::dispatcher::NotificationDispatcher;
use super::find_due_reminders::FindDueRemindersUseCase;
use crate::shared::usecase::execute;
use pensum_domain::ID;
use pensum_infra::Context;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Timer-driven reminder loop for one signed-in owner.
///
/// Lifecycle: a `ReminderPoller` is idle until [`start`](Self::start)
/// consumes it and returns a running [`PollerHandle`]; stopping the
/// handle is terminal - a new session builds a new poller.
///
/// The poller owns the session dedup set, so every reminder id is
/// dispatched at most once per poller lifetime no matter how many ticks
/// pass before its row is deleted. A second poller instance (another
/// tab, a re-login) has its own set and may show the same reminder
/// again; that is accepted session-scoped behavior, not something this
/// type guards against.
pub struct ReminderPoller {
    ctx: Context,
    dispatcher: NotificationDispatcher,
    owner_id: ID,
    dispatched: HashSet<ID>,
}

impl ReminderPoller {
    pub fn new(ctx: Context, dispatcher: NotificationDispatcher, owner_id: ID) -> Self {
        Self {
            ctx,
            dispatcher,
            owner_id,
            dispatched: HashSet::new(),
        }
    }

    /// One matching round: fetch everything due within the lookahead
    /// horizon, dispatch the rows that are actually due now and not yet
    /// seen this session.
    ///
    /// A failed store query abandons the tick; the next tick retries.
    pub async fn tick(&mut self) {
        let now = self.ctx.sys.get_timestamp_millis();
        let usecase = FindDueRemindersUseCase {
            owner_id: self.owner_id.clone(),
            horizon: now + self.ctx.config.reminder_lookahead_millis,
        };

        let due = match execute(usecase, &self.ctx).await {
            Ok(due) => due,
            Err(e) => {
                error!("Reminder tick aborted: {:?}", e);
                return;
            }
        };

        for item in due {
            // Pre-fetched but not yet due: a later tick picks it up
            if item.reminder.fires_at > now {
                continue;
            }
            if self.dispatched.contains(&item.reminder.id) {
                continue;
            }
            self.dispatcher.dispatch(&item).await;
            self.dispatched.insert(item.reminder.id.clone());
        }
    }

    /// Starts the loop: permission request, one immediate tick, then one
    /// tick per `Config.poll_interval_secs`.
    ///
    /// Ticks run inline in the loop task, so two ticks can never
    /// overlap - the timer is not polled again until the current tick
    /// has finished.
    pub fn start(mut self) -> PollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let poll_interval = Duration::from_secs(self.ctx.config.poll_interval_secs);

        let join = tokio::spawn(async move {
            self.dispatcher.request_permission().await;
            self.tick().await;

            let mut interval = tokio::time::interval(poll_interval);
            // The first interval tick fires immediately and was already
            // run above
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => self.tick().await,
                    _ = stop_rx.changed() => break,
                }
            }
            info!("Reminder poller stopped");
        });

        PollerHandle { stop_tx, join }
    }
}

/// A running poller. Dropping the handle also stops the loop, but
/// without waiting for an in-flight tick.
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancels the pending timer and waits for the loop to exit. An
    /// in-flight tick completes first - it only performs idempotent
    /// reads plus at most a delete.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.join.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::dispatcher::test_channels::{FakeSystemNotifier, FakeToastChannel};
    use crate::notification::dispatcher::NotificationPermission;
    use chrono::TimeZone;
    use chrono_tz::Tz;
    use pensum_domain::{Announcement, AnnouncementKind, Reminder, Submission, SubmissionStatus};
    use pensum_infra::ISys;
    use std::sync::Arc;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    struct FailingReminderRepo;

    #[async_trait::async_trait]
    impl pensum_infra::IReminderRepo for FailingReminderRepo {
        async fn insert(&self, _: &Reminder) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("store unreachable"))
        }
        async fn find(&self, _: &ID) -> Option<Reminder> {
            None
        }
        async fn find_due(&self, _: &ID, _: i64) -> anyhow::Result<Vec<Reminder>> {
            Err(anyhow::anyhow!("store unreachable"))
        }
        async fn find_by_owner(&self, _: &ID) -> anyhow::Result<Vec<Reminder>> {
            Err(anyhow::anyhow!("store unreachable"))
        }
        async fn delete(&self, _: &ID) -> anyhow::Result<Option<Reminder>> {
            Err(anyhow::anyhow!("store unreachable"))
        }
    }

    fn tokyo() -> Tz {
        "Asia/Tokyo".parse().unwrap()
    }

    fn ts(tz: &Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        tz.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    struct TestRig {
        ctx: Context,
        system: Arc<FakeSystemNotifier>,
        toast: Arc<FakeToastChannel>,
        poller: ReminderPoller,
        owner_id: ID,
    }

    fn setup(now: i64) -> TestRig {
        let mut ctx = Context::create_inmemory();
        ctx.config.timezone = tokyo();
        ctx.sys = Arc::new(StaticTimeSys(now));
        let system = Arc::new(FakeSystemNotifier::new(NotificationPermission::Granted));
        let toast = Arc::new(FakeToastChannel::default());
        let dispatcher =
            NotificationDispatcher::new(ctx.clone(), system.clone(), toast.clone());
        let owner_id: ID = Default::default();
        let poller = ReminderPoller::new(ctx.clone(), dispatcher, owner_id.clone());
        TestRig {
            ctx,
            system,
            toast,
            poller,
            owner_id,
        }
    }

    async fn insert_assignment_reminder(ctx: &Context, owner_id: &ID, fires_at: i64) -> Reminder {
        let announcement = Announcement {
            id: Default::default(),
            kind: AnnouncementKind::Assignment,
            title: "Essay draft".into(),
            description: String::new(),
            due_date: Some("2025-01-15".into()),
            subject_id: Default::default(),
            subsubject_id: None,
        };
        ctx.repos.announcements.insert(&announcement).await.unwrap();
        let reminder = Reminder::for_announcement(owner_id.clone(), announcement.id.clone(), fires_at);
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[tokio::test]
    async fn a_due_reminder_is_dispatched_once_across_ticks() {
        let tz = tokyo();
        // Reminder fires 2025-01-14 09:00, first tick at 09:01
        let mut rig = setup(ts(&tz, 2025, 1, 14, 9, 1));
        insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 0)).await;

        rig.poller.tick().await;
        assert_eq!(rig.system.sent.lock().unwrap().len(), 1);
        assert_eq!(rig.toast.shown_count(), 1);

        // Second tick at 09:02, row still in the store (not acknowledged)
        rig.poller.ctx.sys = Arc::new(StaticTimeSys(ts(&tz, 2025, 1, 14, 9, 2)));
        rig.poller.tick().await;
        assert_eq!(rig.system.sent.lock().unwrap().len(), 1);
        assert_eq!(rig.toast.shown_count(), 1);
    }

    #[tokio::test]
    async fn prefetched_reminders_wait_for_their_fire_time() {
        let tz = tokyo();
        let now = ts(&tz, 2025, 1, 14, 9, 0);
        let mut rig = setup(now);
        // Within the one-hour lookahead but 30 minutes in the future
        insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 30)).await;

        rig.poller.tick().await;
        assert_eq!(rig.toast.shown_count(), 0);

        // Once the fire time passes it goes out
        rig.poller.ctx.sys = Arc::new(StaticTimeSys(ts(&tz, 2025, 1, 14, 9, 31)));
        rig.poller.tick().await;
        assert_eq!(rig.toast.shown_count(), 1);
    }

    #[tokio::test]
    async fn submitted_assignment_fires_nothing() {
        let tz = tokyo();
        let mut rig = setup(ts(&tz, 2025, 1, 14, 9, 1));
        let reminder =
            insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 0)).await;
        let announcement_id = match &reminder.link {
            pensum_domain::ReminderLink::Announcement(id) => id.clone(),
            _ => unreachable!(),
        };
        let submission = Submission::new(
            announcement_id,
            rig.owner_id.clone(),
            SubmissionStatus::Submitted,
        );
        rig.ctx.repos.submissions.insert(&submission).await.unwrap();

        rig.poller.tick().await;
        assert_eq!(rig.system.sent.lock().unwrap().len(), 0);
        assert_eq!(rig.toast.shown_count(), 0);
    }

    #[tokio::test]
    async fn a_failed_query_aborts_the_tick_and_the_next_one_retries() {
        let tz = tokyo();
        let mut rig = setup(ts(&tz, 2025, 1, 14, 9, 1));
        insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 0)).await;

        // Swap in an unreachable store for one tick
        let real_reminders = rig.poller.ctx.repos.reminders.clone();
        rig.poller.ctx.repos.reminders = Arc::new(FailingReminderRepo);
        rig.poller.tick().await;
        assert_eq!(rig.toast.shown_count(), 0);

        // Store comes back, next tick delivers
        rig.poller.ctx.repos.reminders = real_reminders;
        rig.poller.tick().await;
        assert_eq!(rig.toast.shown_count(), 1);
    }

    #[tokio::test]
    async fn a_failed_delete_on_confirm_keeps_the_row_but_stays_quiet() {
        let tz = tokyo();
        let mut rig = setup(ts(&tz, 2025, 1, 14, 9, 1));
        let reminder =
            insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 0)).await;

        // The confirm action goes through a store that cannot delete
        let mut failing_ctx = rig.ctx.clone();
        failing_ctx.repos.reminders = Arc::new(FailingReminderRepo);
        let dispatcher = NotificationDispatcher::new(
            failing_ctx,
            rig.system.clone(),
            rig.toast.clone(),
        );
        rig.poller = ReminderPoller::new(rig.ctx.clone(), dispatcher, rig.owner_id.clone());

        rig.poller.tick().await;
        let ack = rig.toast.take_acks().pop().unwrap();
        ack.confirm().await;

        // The row survives the failed delete
        assert!(rig.ctx.repos.reminders.find(&reminder.id).await.is_some());

        // But the dedup set keeps it quiet for the rest of the session
        rig.poller.ctx.sys = Arc::new(StaticTimeSys(ts(&tz, 2025, 1, 14, 9, 2)));
        rig.poller.tick().await;
        assert_eq!(rig.toast.shown_count(), 0);
        assert_eq!(rig.system.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn the_timer_loop_starts_and_stops() {
        let tz = tokyo();
        let now = ts(&tz, 2025, 1, 14, 9, 1);
        let mut rig = setup(now);
        rig.ctx.config.poll_interval_secs = 1;
        insert_assignment_reminder(&rig.ctx, &rig.owner_id, ts(&tz, 2025, 1, 14, 9, 0)).await;

        // Rebuild the poller against the shortened interval
        let dispatcher = NotificationDispatcher::new(
            rig.ctx.clone(),
            rig.system.clone(),
            rig.toast.clone(),
        );
        let poller = ReminderPoller::new(rig.ctx.clone(), dispatcher, rig.owner_id.clone());

        let handle = poller.start();
        // The immediate tick runs without waiting for the interval
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rig.toast.shown_count(), 1);
        assert_eq!(*rig.system.permission_requests.lock().unwrap(), 0);

        handle.stop().await;
        // No further ticks after stop
        let before = rig.toast.shown_count();
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(rig.toast.shown_count(), before);
    }
}
