use chrono_tz::Tz;
use tracing::warn;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_LOOKAHEAD_MINUTES: i64 = 60;
const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 3;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the reminder poller ticks, in seconds
    pub poll_interval_secs: u64,
    /// How far ahead of "now" the poller pre-fetches reminders, in
    /// millis. Pre-fetched reminders are not dispatched until their fire
    /// time has actually passed.
    pub reminder_lookahead_millis: i64,
    /// Size of the window used by the upcoming-notifications view, in
    /// days from today
    pub upcoming_window_days: i64,
    /// Timezone that stored instants and the period grid are interpreted
    /// in. The planner runs in a single calendar locale.
    pub timezone: Tz,
}

fn env_number<T: std::str::FromStr + std::fmt::Display + Copy>(var: &str, default: T) -> T {
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    var, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let poll_interval_secs =
            env_number("PENSUM_POLL_INTERVAL", DEFAULT_POLL_INTERVAL_SECS).max(1);
        let lookahead_minutes =
            env_number("PENSUM_LOOKAHEAD_MINUTES", DEFAULT_LOOKAHEAD_MINUTES).max(0);
        let upcoming_window_days =
            env_number("PENSUM_UPCOMING_WINDOW_DAYS", DEFAULT_UPCOMING_WINDOW_DAYS).max(0);

        let timezone = match std::env::var("PENSUM_TIMEZONE") {
            Ok(raw) => match raw.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given PENSUM_TIMEZONE: {} is not valid, falling back to the default timezone: {}.",
                        raw, DEFAULT_TIMEZONE
                    );
                    DEFAULT_TIMEZONE
                }
            },
            Err(_) => DEFAULT_TIMEZONE,
        };

        Self {
            poll_interval_secs,
            reminder_lookahead_millis: lookahead_minutes * 60 * 1000,
            upcoming_window_days,
            timezone,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
