//! Demo data for a freshly created library

use chrono::{Duration, NaiveDate};

use crate::models::{BookStatus, NewBook, NewLoan, NewStudent};
use crate::storage::{NewRecord, RecordRef, WriteOp};

const BOOKS: &[(&str, &str)] = &[
    ("Python 101", "Guido van Rossum"),
    ("C Programming", "Dennis Ritchie"),
    ("Clean Code", "Robert C. Martin"),
    ("The Pragmatic Programmer", "Andy Hunt"),
    ("JavaScript: The Good Parts", "Douglas Crockford"),
    ("Design Patterns", "Erich Gamma"),
    ("Introduction to Algorithms", "Thomas H. Cormen"),
];

const STUDENTS: &[(&str, &str, &str, &str)] = &[
    ("Arun Kumar", "BCA", "arun.k@library.edu", "+91 98765 43210"),
    ("Divya Sharma", "B.Sc CS", "divya.s@library.edu", "+91 98765 43211"),
    ("Rahul Verma", "B.Tech IT", "rahul.v@library.edu", "+91 98765 43212"),
    ("Sneha Gupta", "MBA", "sneha.g@library.edu", "+91 98765 43213"),
];

/// (book index, student index, issued days ago, due days ago)
///
/// A negative "due days ago" is a due date in the future.
const LOANS: &[(usize, usize, i64, i64)] = &[
    (1, 0, 10, 3),  // overdue
    (4, 1, 2, -5),  // active
    (6, 2, 20, 13), // heavily overdue
];

/// Writes that populate an empty library, with loan dates relative to `today`
pub fn demo_ops(today: NaiveDate) -> Vec<WriteOp> {
    let mut ops = Vec::with_capacity(BOOKS.len() + STUDENTS.len() + LOANS.len());

    for (index, (title, author)) in BOOKS.iter().enumerate() {
        let mut book = NewBook::new(*title, *author);
        if LOANS.iter().any(|(b, ..)| *b == index) {
            book.status = BookStatus::Issued;
        }
        ops.push(WriteOp::Create(NewRecord::Book(book)));
    }

    for (name, course, email, phone) in STUDENTS {
        ops.push(WriteOp::Create(NewRecord::Student(NewStudent::register(
            *name,
            *course,
            Some(email.to_string()),
            Some(phone.to_string()),
        ))));
    }

    for &(book, student, issued_ago, due_ago) in LOANS {
        ops.push(WriteOp::Create(NewRecord::Loan(NewLoan {
            book: RecordRef::Batch(book),
            student: RecordRef::Batch(BOOKS.len() + student),
            student_name: STUDENTS[student].0.to_string(),
            book_name: BOOKS[book].0.to_string(),
            issue_date: today - Duration::days(issued_ago),
            due_date: today - Duration::days(due_ago),
        })));
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LibraryStats, Snapshot};
    use crate::storage::{EntityStore, SqliteStore};

    #[test]
    fn test_demo_data_is_consistent() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.run_atomically(demo_ops(today)).unwrap();

        let snapshot = Snapshot::load(&store).unwrap();
        assert_eq!(snapshot.books.len(), 7);
        assert_eq!(snapshot.students.len(), 4);
        assert_eq!(snapshot.loans.len(), 3);

        // Every issued book has exactly one loan and vice versa
        for book in &snapshot.books {
            assert_eq!(
                book.status == BookStatus::Issued,
                snapshot.loan_for_book(book.id).is_some(),
                "inconsistent status for {}",
                book.title
            );
        }

        let stats = LibraryStats::compute(&snapshot, today);
        assert_eq!(stats.overdue_loans, 2);
        assert_eq!(stats.due_soon_loans, 0);

        let arun = &snapshot.loans[0];
        assert_eq!(arun.student_name, "Arun Kumar");
        assert_eq!(arun.book_name, "C Programming");
        assert_eq!(arun.due_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }
}
