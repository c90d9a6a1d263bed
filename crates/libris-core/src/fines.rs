//! Fine and overdue calculation
//!
//! All functions work on calendar dates, so the time of day never affects
//! the result. A loan due today is not overdue.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Fine charged for each day a loan is overdue
pub const FINE_PER_DAY: i64 = 10;

/// Length of a loan in days
pub const LOAN_PERIOD_DAYS: i64 = 7;

/// A loan is "due soon" when its due date is at most this many days away
pub const DUE_SOON_WINDOW_DAYS: i64 = 2;

/// Due date for a loan issued on `issue_date`
pub fn due_date_for(issue_date: NaiveDate) -> NaiveDate {
    issue_date + Duration::days(LOAN_PERIOD_DAYS)
}

/// Whole days past the due date, 0 when not overdue
pub fn overdue_days(due: NaiveDate, today: NaiveDate) -> i64 {
    (today - due).num_days().max(0)
}

/// Fine owed as of `today`
pub fn calculate_fine(due: NaiveDate, today: NaiveDate) -> i64 {
    overdue_days(due, today) * FINE_PER_DAY
}

pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    today > due
}

/// Due today or within the next [`DUE_SOON_WINDOW_DAYS`] days
pub fn is_due_soon(due: NaiveDate, today: NaiveDate) -> bool {
    let days_until_due = (due - today).num_days();
    (0..=DUE_SOON_WINDOW_DAYS).contains(&days_until_due)
}

/// How a loan stands relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    Overdue,
    DueSoon,
    Active,
}

impl Standing {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        if is_overdue(due, today) {
            Standing::Overdue
        } else if is_due_soon(due, today) {
            Standing::DueSoon
        } else {
            Standing::Active
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::Overdue => "Overdue",
            Standing::DueSoon => "Due Soon",
            Standing::Active => "Active",
        }
    }
}

/// Overdue days and the resulting fine for one loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FineAssessment {
    pub overdue_days: i64,
    pub amount: i64,
}

impl FineAssessment {
    pub fn assess(due: NaiveDate, today: NaiveDate) -> Self {
        let overdue_days = overdue_days(due, today);
        Self {
            overdue_days,
            amount: overdue_days * FINE_PER_DAY,
        }
    }

    pub fn is_due(&self) -> bool {
        self.amount > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 13)
    }

    #[test]
    fn test_due_today() {
        let due = today();
        assert_eq!(calculate_fine(due, today()), 0);
        assert_eq!(overdue_days(due, today()), 0);
        assert!(!is_overdue(due, today()));
        assert!(is_due_soon(due, today()));
        assert_eq!(Standing::classify(due, today()), Standing::DueSoon);
    }

    #[test]
    fn test_due_yesterday() {
        let due = date(2024, 1, 12);
        assert_eq!(calculate_fine(due, today()), FINE_PER_DAY);
        assert_eq!(overdue_days(due, today()), 1);
        assert!(is_overdue(due, today()));
        assert!(!is_due_soon(due, today()));
    }

    #[test]
    fn test_due_soon_window_boundary() {
        assert!(is_due_soon(date(2024, 1, 14), today()));
        assert!(is_due_soon(date(2024, 1, 15), today()));
        assert!(!is_due_soon(date(2024, 1, 16), today()));
        assert_eq!(
            Standing::classify(date(2024, 1, 16), today()),
            Standing::Active
        );
    }

    #[test]
    fn test_three_days_overdue() {
        let due = date(2024, 1, 10);
        assert_eq!(calculate_fine(due, today()), 30);
        assert_eq!(overdue_days(due, today()), 3);
        assert!(is_overdue(due, today()));
        assert!(!is_due_soon(due, today()));

        let assessment = FineAssessment::assess(due, today());
        assert_eq!(assessment.overdue_days, 3);
        assert_eq!(assessment.amount, 30);
        assert!(assessment.is_due());
    }

    #[test]
    fn test_overdue_across_month_boundary() {
        let due = date(2024, 2, 27);
        let today = date(2024, 3, 2);
        // 2024 is a leap year: Feb 28, Feb 29, Mar 1, Mar 2
        assert_eq!(overdue_days(due, today), 4);
        assert_eq!(calculate_fine(due, today), 40);
    }

    #[test]
    fn test_due_date_for() {
        assert_eq!(due_date_for(date(2024, 1, 3)), date(2024, 1, 10));
        assert_eq!(due_date_for(date(2024, 12, 28)), date(2025, 1, 4));
    }
}
