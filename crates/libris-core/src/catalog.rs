//! Read-side views over the library
//!
//! A [`Snapshot`] holds all three collections as read in one go. Searches,
//! dashboard statistics and the circulation planner all work from a
//! snapshot rather than issuing their own queries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::fines::{FineAssessment, Standing};
use crate::models::{Book, BookStatus, Loan, Student};
use crate::storage::{EntityStore, StorageResult};

/// Number of books shown as new arrivals on the dashboard
pub const NEW_ARRIVALS_LIMIT: usize = 5;

/// Every book, student and loan at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub students: Vec<Student>,
    pub loans: Vec<Loan>,
}

impl Snapshot {
    pub fn load<S: EntityStore + ?Sized>(store: &S) -> StorageResult<Self> {
        Ok(Self {
            books: store.list_books()?,
            students: store.list_students()?,
            loans: store.list_loans()?,
        })
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn loan(&self, id: i64) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    /// The active loan for a book, if it is lent out
    pub fn loan_for_book(&self, book_id: i64) -> Option<&Loan> {
        self.loans.iter().find(|l| l.book_id == book_id)
    }

    pub fn loans_for_student(&self, student_id: i64) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|l| l.student_id == student_id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.students.is_empty() && self.loans.is_empty()
    }
}

/// Which books to show by availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Issued,
}

impl StatusFilter {
    fn matches(&self, status: BookStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => status == BookStatus::Available,
            StatusFilter::Issued => status == BookStatus::Issued,
        }
    }
}

/// Catalog search: case-insensitive text on title or author plus a status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl BookFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let query = self.query.to_lowercase();
        let text_matches = book.title.to_lowercase().contains(&query)
            || book.author.to_lowercase().contains(&query);
        text_matches && self.status.matches(book.status)
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b)).collect()
    }
}

/// The most recently added books, newest first
pub fn new_arrivals(books: &[Book], limit: usize) -> Vec<&Book> {
    books.iter().rev().take(limit).collect()
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
    pub issued_books: usize,
    pub students: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub due_soon_loans: usize,
}

impl LibraryStats {
    pub fn compute(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let available_books = snapshot.books.iter().filter(|b| b.is_available()).count();
        let standing = |wanted: Standing| {
            snapshot
                .loans
                .iter()
                .filter(|l| Standing::classify(l.due_date, today) == wanted)
                .count()
        };

        Self {
            total_books: snapshot.books.len(),
            available_books,
            issued_books: snapshot.books.len() - available_books,
            students: snapshot.students.len(),
            active_loans: snapshot.loans.len(),
            overdue_loans: standing(Standing::Overdue),
            due_soon_loans: standing(Standing::DueSoon),
        }
    }
}

/// A loan together with how it stands today
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    #[serde(flatten)]
    pub loan: Loan,
    pub standing: Standing,
    pub overdue_days: i64,
    pub fine: i64,
}

impl LoanView {
    pub fn new(loan: Loan, today: NaiveDate) -> Self {
        let assessment = FineAssessment::assess(loan.due_date, today);
        Self {
            standing: Standing::classify(loan.due_date, today),
            overdue_days: assessment.overdue_days,
            fine: assessment.amount,
            loan,
        }
    }
}
