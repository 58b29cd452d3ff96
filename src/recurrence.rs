use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::models::{RecurrenceType, Task};

/// Window ahead of now inside which a pending execution counts as due soon.
/// A task exactly 24h away still classifies as due soon.
const DUE_SOON_WINDOW_HOURS: i64 = 24;

/// Traffic-light classification of a recurring task's next execution,
/// display-only; the backend owns the actual recurrence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Scheduled,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "overdue",
            DueStatus::DueSoon => "due soon",
            DueStatus::Scheduled => "scheduled",
        }
    }

    pub fn traffic_light(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "red",
            DueStatus::DueSoon => "orange",
            DueStatus::Scheduled => "green",
        }
    }
}

pub fn classify(next_execution_at: DateTime<Utc>, now: DateTime<Utc>) -> DueStatus {
    if next_execution_at < now {
        return DueStatus::Overdue;
    }

    if next_execution_at - now <= Duration::hours(DUE_SOON_WINDOW_HOURS) {
        return DueStatus::DueSoon;
    }

    DueStatus::Scheduled
}

pub fn classify_task(task: &Task, now: DateTime<Utc>) -> Option<DueStatus> {
    task.next_execution_at
        .map(|next_execution_at| classify(next_execution_at, now))
}

/// Renders the type/days/times triple as a short human-readable schedule,
/// e.g. "weekly on Sun, Wed at 08:00".
pub fn schedule_description(task: &Task) -> String {
    let Some(recurrence_type) = task.recurrence_type.filter(|_| task.is_recurring) else {
        return "not recurring".to_string();
    };

    let mut description = recurrence_type.as_str().to_string();

    if recurrence_type == RecurrenceType::Weekly {
        let days = weekday_list(task.recurrence_days.as_deref().unwrap_or_default());
        if !days.is_empty() {
            description.push_str(" on ");
            description.push_str(&days);
        }
    }

    if let Some(times) = task.recurrence_times.as_deref() {
        if !times.is_empty() {
            description.push_str(" at ");
            description.push_str(&times.join(", "));
        }
    }

    description
}

/// Weekday ordinals follow the backend's storage convention, 0 = Sunday.
pub fn weekday_name(day: u8) -> Option<&'static str> {
    match day {
        0 => Some("Sun"),
        1 => Some("Mon"),
        2 => Some("Tue"),
        3 => Some("Wed"),
        4 => Some("Thu"),
        5 => Some("Fri"),
        6 => Some("Sat"),
        _ => None,
    }
}

fn weekday_list(days: &[u8]) -> String {
    days.iter()
        .filter_map(|day| weekday_name(*day))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates a recurrence time entry against the backend's "HH:MM" format.
pub fn is_valid_time(value: &str) -> bool {
    static TIME_FORMAT: OnceLock<Regex> = OnceLock::new();
    let pattern = TIME_FORMAT.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern should compile")
    });
    pattern.is_match(value)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{classify, classify_task, is_valid_time, schedule_description, DueStatus};
    use crate::models::{RecurrenceType, Task};

    fn recurring_task() -> Task {
        Task {
            id: 1,
            project_id: 1,
            parent_task_id: None,
            title: "Backup".to_string(),
            description: String::new(),
            status_id: 1,
            priority_id: 1,
            created_by_id: 1,
            assigned_to_id: None,
            deadline: None,
            position: 0,
            is_completed: false,
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::Weekly),
            recurrence_times: Some(vec!["08:00".to_string()]),
            recurrence_days: Some(vec![0, 3]),
            last_executed_at: None,
            next_execution_at: None,
            created_at: None,
            updated_at: None,
            attachments: Vec::new(),
            dependencies: Vec::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn past_execution_is_overdue() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let status = classify(now - Duration::minutes(1), now);
        assert_eq!(status, DueStatus::Overdue);
        assert_eq!(status.traffic_light(), "red");
    }

    #[test]
    fn execution_within_a_day_is_due_soon() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let status = classify(now + Duration::hours(3), now);
        assert_eq!(status, DueStatus::DueSoon);
        assert_eq!(status.traffic_light(), "orange");
    }

    #[test]
    fn execution_exactly_a_day_away_is_due_soon() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(classify(now + Duration::hours(24), now), DueStatus::DueSoon);
    }

    #[test]
    fn execution_beyond_a_day_is_scheduled() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let status = classify(now + Duration::hours(24) + Duration::seconds(1), now);
        assert_eq!(status, DueStatus::Scheduled);
        assert_eq!(status.traffic_light(), "green");
    }

    #[test]
    fn execution_right_now_is_due_soon() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(classify(now, now), DueStatus::DueSoon);
    }

    #[test]
    fn task_without_next_execution_has_no_status() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(classify_task(&recurring_task(), now), None);
    }

    #[test]
    fn weekly_description_lists_days_and_times() {
        let description = schedule_description(&recurring_task());
        assert_eq!(description, "weekly on Sun, Wed at 08:00");
    }

    #[test]
    fn daily_description_lists_times_only() {
        let mut task = recurring_task();
        task.recurrence_type = Some(RecurrenceType::Daily);
        task.recurrence_times = Some(vec!["08:00".to_string(), "18:30".to_string()]);
        assert_eq!(schedule_description(&task), "daily at 08:00, 18:30");
    }

    #[test]
    fn monthly_description_ignores_weekdays() {
        let mut task = recurring_task();
        task.recurrence_type = Some(RecurrenceType::Monthly);
        assert_eq!(schedule_description(&task), "monthly at 08:00");
    }

    #[test]
    fn non_recurring_task_is_described_as_such() {
        let mut task = recurring_task();
        task.is_recurring = false;
        assert_eq!(schedule_description(&task), "not recurring");
    }

    #[test]
    fn unknown_weekday_ordinals_are_skipped() {
        let mut task = recurring_task();
        task.recurrence_days = Some(vec![0, 9]);
        assert_eq!(schedule_description(&task), "weekly on Sun at 08:00");
    }

    #[test]
    fn time_format_accepts_valid_and_rejects_invalid() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("08:30"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("8:30"));
        assert!(!is_valid_time("08:60"));
        assert!(!is_valid_time("0830"));
        assert!(!is_valid_time(""));
    }
}
