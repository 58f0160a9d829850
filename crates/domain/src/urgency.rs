use serde::{Deserialize, Serialize};

/// Day-distance at or below which a deadline is rendered as "due soon"
/// on the calendar cards.
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Stricter boundary used by the notifications list only. The two
/// consumers intentionally disagree on where "urgent" starts, so this is
/// a separate constant and must not be folded into
/// [`DUE_SOON_WINDOW_DAYS`].
pub const IMMEDIATE_WINDOW_DAYS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Urgency {
    Normal,
    DueSoon,
    Overdue,
}

impl Urgency {
    pub fn from_days_until(days_until: i64) -> Self {
        if days_until < 0 {
            Self::Overdue
        } else if days_until <= DUE_SOON_WINDOW_DAYS {
            Self::DueSoon
        } else {
            Self::Normal
        }
    }
}

/// Notification-list boundary: today or tomorrow (and anything overdue).
pub fn is_immediate(days_until: i64) -> bool {
    days_until <= IMMEDIATE_WINDOW_DAYS
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_classifies_day_distances() {
        assert_eq!(Urgency::from_days_until(-10), Urgency::Overdue);
        assert_eq!(Urgency::from_days_until(-1), Urgency::Overdue);
        assert_eq!(Urgency::from_days_until(0), Urgency::DueSoon);
        assert_eq!(Urgency::from_days_until(3), Urgency::DueSoon);
        assert_eq!(Urgency::from_days_until(4), Urgency::Normal);
        assert_eq!(Urgency::from_days_until(365), Urgency::Normal);
    }

    #[test]
    fn immediate_boundary_is_stricter_than_due_soon() {
        assert!(is_immediate(-1));
        assert!(is_immediate(0));
        assert!(is_immediate(1));
        assert!(!is_immediate(2));
        // 2 and 3 days out are "due soon" but not "immediate"
        assert_eq!(Urgency::from_days_until(2), Urgency::DueSoon);
    }
}
