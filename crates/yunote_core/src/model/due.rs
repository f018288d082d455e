//! Due-date display derivation.
//!
//! # Responsibility
//! - Turn `(now, due date)` into a remaining-time label and urgency tier.
//!
//! # Invariants
//! - Pure: no clock access, no side effects; the same inputs always produce
//!   the same summary.
//! - Day differences use ceiling rounding: a due time later today already
//!   counts as 1 day, while a due time missed earlier today still counts
//!   as 0 ("Today", not "Overdue").

use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Urgency tier for a due date, bucketed by remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Past due.
    Critical,
    /// Due today or tomorrow.
    High,
    /// Due within three days.
    Medium,
    /// Everything further out.
    Low,
}

impl Urgency {
    /// Display color used by the list view.
    pub fn color(self) -> &'static str {
        match self {
            Self::Critical => "#ef4444",
            Self::High => "#f97316",
            Self::Medium => "#eab308",
            Self::Low => "#3b82f6",
        }
    }
}

/// Derived remaining-time presentation for one due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueSummary {
    /// Whole days remaining, ceiling-rounded; negative when overdue.
    pub days_remaining: i64,
    /// Human-readable remaining-time label.
    pub label: String,
    pub urgency: Urgency,
}

/// Computes the remaining-time label and urgency tier for `due` as seen
/// from `now`.
pub fn due_summary(now: DateTime<Utc>, due: DateTime<Utc>) -> DueSummary {
    let days = days_remaining(now, due);
    DueSummary {
        days_remaining: days,
        label: label_for(days),
        urgency: urgency_for(days),
    }
}

fn days_remaining(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    let diff_ms = (due - now).num_milliseconds() as f64;
    (diff_ms / MS_PER_DAY).ceil() as i64
}

fn label_for(days: i64) -> String {
    if days < 0 {
        return "Overdue".to_string();
    }
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=6 => format!("{days} days left"),
        _ => {
            let weeks = days / 7;
            let rest = days % 7;
            let week_word = if weeks == 1 { "week" } else { "weeks" };
            if rest == 0 {
                format!("{weeks} {week_word} left")
            } else {
                let day_word = if rest == 1 { "day" } else { "days" };
                format!("{weeks} {week_word} {rest} {day_word} left")
            }
        }
    }
}

fn urgency_for(days: i64) -> Urgency {
    if days < 0 {
        Urgency::Critical
    } else if days <= 1 {
        Urgency::High
    } else if days <= 3 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}
