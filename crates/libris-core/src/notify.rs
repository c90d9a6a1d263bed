//! Borrower notifications
//!
//! Composes the alert text for loans that need chasing. Nothing is actually
//! delivered; the message names the channels it would go out on.

use chrono::NaiveDate;
use serde::Serialize;

use crate::fines::{FineAssessment, Standing};
use crate::models::{Loan, Student};

const UNKNOWN_PHONE: &str = "Unknown";
const UNKNOWN_EMAIL: &str = "unknown@library.edu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Past the due date; carries the fine
    Overdue,
    /// Due within the due-soon window
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub loan_id: i64,
    pub kind: NotificationKind,
    pub phone: String,
    pub email: String,
    pub fine: i64,
    pub message: String,
}

/// Compose the notification for `loan`, if it is overdue or due soon
///
/// `student` is the borrower record; when it has since been removed the
/// message falls back to placeholder contact details.
pub fn compose(loan: &Loan, student: Option<&Student>, today: NaiveDate) -> Option<Notification> {
    let kind = match Standing::classify(loan.due_date, today) {
        Standing::Overdue => NotificationKind::Overdue,
        Standing::DueSoon => NotificationKind::Reminder,
        Standing::Active => return None,
    };

    let phone = student.map_or(UNKNOWN_PHONE, |s| s.phone.as_str()).to_string();
    let email = student.map_or(UNKNOWN_EMAIL, |s| s.email.as_str()).to_string();
    let fine = FineAssessment::assess(loan.due_date, today).amount;

    let message = match kind {
        NotificationKind::Overdue => format!(
            "Alert sent! SMS to {} & Email to {}. Fine Amount: ₹{}",
            phone, email, fine
        ),
        NotificationKind::Reminder => format!(
            "Reminder sent! SMS to {} & Email to {} regarding \"{}\".",
            phone, email, loan.book_name
        ),
    };

    Some(Notification {
        loan_id: loan.id,
        kind,
        phone,
        email,
        fine,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(due: NaiveDate) -> Loan {
        Loan {
            id: 4,
            book_id: 2,
            student_id: 1,
            student_name: "Arun Kumar".to_string(),
            book_name: "C Programming".to_string(),
            issue_date: due - chrono::Duration::days(7),
            due_date: due,
        }
    }

    fn arun() -> Student {
        Student {
            id: 1,
            name: "Arun Kumar".to_string(),
            course: "BCA".to_string(),
            email: "arun.k@library.edu".to_string(),
            phone: "+91 98765 43210".to_string(),
        }
    }

    #[test]
    fn test_overdue_alert_includes_fine() {
        let student = arun();
        let note = compose(&loan(date(2024, 1, 10)), Some(&student), date(2024, 1, 13)).unwrap();

        assert_eq!(note.kind, NotificationKind::Overdue);
        assert_eq!(note.fine, 30);
        assert_eq!(
            note.message,
            "Alert sent! SMS to +91 98765 43210 & Email to arun.k@library.edu. Fine Amount: ₹30"
        );
    }

    #[test]
    fn test_reminder_names_book() {
        let student = arun();
        let note = compose(&loan(date(2024, 1, 15)), Some(&student), date(2024, 1, 13)).unwrap();

        assert_eq!(note.kind, NotificationKind::Reminder);
        assert_eq!(note.fine, 0);
        assert!(note.message.contains("regarding \"C Programming\"."));
    }

    #[test]
    fn test_missing_student_uses_placeholders() {
        let note = compose(&loan(date(2024, 1, 13)), None, date(2024, 1, 13)).unwrap();
        assert_eq!(note.phone, "Unknown");
        assert_eq!(note.email, "unknown@library.edu");
    }

    #[test]
    fn test_active_loan_has_no_notification() {
        assert!(compose(&loan(date(2024, 1, 20)), None, date(2024, 1, 13)).is_none());
    }
}
