//! Library facade
//!
//! `Library` is the entry point used by front ends. It owns the entity
//! store, the clock and the role of the current session, and keeps a cached
//! [`Snapshot`] for reads.
//!
//! Writes always plan against a snapshot read fresh from the store and drop
//! the cache afterwards, so the next read sees the committed state.
//!
//! ## Usage
//!
//! ```ignore
//! let mut library = Library::open()?;
//!
//! let loan = library.issue_book(student_id, book_id)?;
//! match library.return_book(loan.id)? {
//!     ReturnOutcome::Returned(receipt) => println!("returned"),
//!     ReturnOutcome::PaymentRequired(notice) => {
//!         library.confirm_payment(&notice)?;
//!     }
//! }
//! ```

use std::cell::RefCell;

use anyhow::Context;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::access::{authorize, Action, Role, UserProfile};
use crate::catalog::{
    new_arrivals, BookFilter, LibraryStats, LoanView, Snapshot, NEW_ARRIVALS_LIMIT,
};
use crate::circulation::{self, FineNotice, ReturnDecision, ReturnOutcome, ReturnReceipt};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookPatch, Loan, NewBook, NewStudent, Student};
use crate::notify::{self, Notification};
use crate::seed;
use crate::storage::{Collection, EntityStore, NewRecord, SqliteStore, WriteOp};
use crate::transfer::{self, ExportDocument, ImportSummary};

pub struct Library<S: EntityStore = SqliteStore> {
    store: S,
    clock: Box<dyn Clock>,
    role: Role,
    cache: RefCell<Option<Snapshot>>,
}

impl Library<SqliteStore> {
    /// Open the library described by the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config).context("Failed to open library database")
    }

    /// Open (or create) the library database for `config`
    ///
    /// A newly created database is populated with demo data when
    /// `seed_demo_data` is enabled.
    pub fn open_with_config(config: &Config) -> LibraryResult<Self> {
        Self::open_with_clock(config, SystemClock)
    }

    pub fn open_with_clock(config: &Config, clock: impl Clock + 'static) -> LibraryResult<Self> {
        let store = SqliteStore::open(config)?;
        let created = store.was_created();

        let mut library = Self::new(store, clock);
        library.role = config.role;

        if created && config.seed_demo_data {
            library.seed_demo_data()?;
        }
        Ok(library)
    }

    /// An empty library in memory (for testing)
    pub fn open_in_memory() -> LibraryResult<Self> {
        Ok(Self::new(SqliteStore::open_in_memory()?, SystemClock))
    }
}

impl<S: EntityStore> Library<S> {
    pub fn new(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            role: Role::default(),
            cache: RefCell::new(None),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Populate the store with the demo books, students and loans
    pub fn seed_demo_data(&mut self) -> LibraryResult<()> {
        let ops = seed::demo_ops(self.today());
        let count = ops.len();
        self.commit(ops)?;
        info!("Seeded library with {} demo records", count);
        Ok(())
    }

    // ==================== Reads ====================

    /// A copy of the current snapshot
    pub fn snapshot(&self) -> LibraryResult<Snapshot> {
        self.with_snapshot(Snapshot::clone)
    }

    pub fn profile(&self) -> LibraryResult<UserProfile> {
        self.check(Action::ViewProfile)?;
        Ok(UserProfile::demo(self.role))
    }

    pub fn books(&self) -> LibraryResult<Vec<Book>> {
        self.check(Action::BrowseBooks)?;
        self.with_snapshot(|s| s.books.clone())
    }

    pub fn search_books(&self, filter: &BookFilter) -> LibraryResult<Vec<Book>> {
        self.check(Action::BrowseBooks)?;
        self.with_snapshot(|s| filter.apply(&s.books).into_iter().cloned().collect())
    }

    pub fn new_arrivals(&self) -> LibraryResult<Vec<Book>> {
        self.check(Action::ViewDashboard)?;
        self.with_snapshot(|s| {
            new_arrivals(&s.books, NEW_ARRIVALS_LIMIT)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn stats(&self) -> LibraryResult<LibraryStats> {
        self.check(Action::ViewDashboard)?;
        let today = self.today();
        self.with_snapshot(|s| LibraryStats::compute(s, today))
    }

    pub fn students(&self) -> LibraryResult<Vec<Student>> {
        self.check(Action::ViewStudents)?;
        self.with_snapshot(|s| s.students.clone())
    }

    /// Active loans with their standing and fine as of today
    pub fn loans(&self) -> LibraryResult<Vec<LoanView>> {
        self.check(Action::ViewLoans)?;
        let today = self.today();
        self.with_snapshot(|s| {
            s.loans
                .iter()
                .map(|loan| LoanView::new(loan.clone(), today))
                .collect()
        })
    }

    // ==================== Catalog ====================

    pub fn add_book(&mut self, title: &str, author: &str) -> LibraryResult<Book> {
        self.check(Action::ManageBooks)?;
        let title = required("Title", title)?;
        let author = required("Author", author)?;

        let book = NewBook::new(title, author);
        let id = self.create(NewRecord::Book(book.clone()))?;
        info!("Added book {} \"{}\"", id, book.title);

        Ok(Book {
            id,
            title: book.title,
            author: book.author,
            status: book.status,
        })
    }

    /// Change a book's title and/or author
    ///
    /// Availability is not editable here; it only changes through issue and
    /// return.
    pub fn update_book(
        &mut self,
        id: i64,
        title: Option<&str>,
        author: Option<&str>,
    ) -> LibraryResult<Book> {
        self.check(Action::ManageBooks)?;
        let patch = BookPatch {
            title: title.map(|t| required("Title", t)).transpose()?,
            author: author.map(|a| required("Author", a)).transpose()?,
            status: None,
        };

        let snapshot = self.fresh_snapshot()?;
        let mut book = snapshot
            .book(id)
            .cloned()
            .ok_or(LibraryError::BookNotFound(id))?;

        self.commit(vec![WriteOp::UpdateBook {
            id,
            patch: patch.clone(),
        }])?;

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        info!("Updated book {}", id);
        Ok(book)
    }

    /// Delete one book; it must exist and must not be on loan
    pub fn delete_book(&mut self, id: i64) -> LibraryResult<()> {
        self.check(Action::ManageBooks)?;
        let snapshot = self.fresh_snapshot()?;
        if snapshot.book(id).is_none() {
            return Err(LibraryError::BookNotFound(id));
        }
        self.delete_books(&[id]).map(|_| ())
    }

    /// Delete several books at once
    ///
    /// Ids that do not exist are skipped. If any listed book is on loan
    /// nothing is deleted. Returns how many books were removed.
    pub fn delete_books(&mut self, ids: &[i64]) -> LibraryResult<usize> {
        self.check(Action::ManageBooks)?;
        let snapshot = self.fresh_snapshot()?;

        let mut existing = Vec::new();
        for &id in ids {
            let Some(book) = snapshot.book(id) else {
                continue;
            };
            if snapshot.loan_for_book(id).is_some() {
                return Err(LibraryError::BookOnLoan {
                    id,
                    title: book.title.clone(),
                });
            }
            if !existing.contains(&id) {
                existing.push(id);
            }
        }

        self.commit(vec![WriteOp::BulkDelete {
            collection: Collection::Books,
            ids: existing.clone(),
        }])?;
        info!("Deleted {} book(s)", existing.len());
        Ok(existing.len())
    }

    // ==================== Students ====================

    pub fn register_student(
        &mut self,
        name: &str,
        course: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> LibraryResult<Student> {
        self.check(Action::ManageStudents)?;
        let name = required("Name", name)?;
        let course = required("Course", course)?;

        let student = NewStudent::register(
            name,
            course,
            email.map(|e| e.trim().to_string()),
            phone.map(|p| p.trim().to_string()),
        );
        let id = self.create(NewRecord::Student(student.clone()))?;
        info!("Registered student {} ({})", id, student.name);

        Ok(Student {
            id,
            name: student.name,
            course: student.course,
            email: student.email,
            phone: student.phone,
        })
    }

    pub fn delete_student(&mut self, id: i64) -> LibraryResult<()> {
        self.check(Action::ManageStudents)?;
        let snapshot = self.fresh_snapshot()?;
        if snapshot.student(id).is_none() {
            return Err(LibraryError::StudentNotFound(id));
        }
        self.delete_students(&[id]).map(|_| ())
    }

    /// Delete several students at once; all-or-nothing like [`Self::delete_books`]
    pub fn delete_students(&mut self, ids: &[i64]) -> LibraryResult<usize> {
        self.check(Action::ManageStudents)?;
        let snapshot = self.fresh_snapshot()?;

        let mut existing = Vec::new();
        for &id in ids {
            let Some(student) = snapshot.student(id) else {
                continue;
            };
            let loans = snapshot.loans_for_student(id).len();
            if loans > 0 {
                return Err(LibraryError::StudentHasLoans {
                    id,
                    name: student.name.clone(),
                    loans,
                });
            }
            if !existing.contains(&id) {
                existing.push(id);
            }
        }

        self.commit(vec![WriteOp::BulkDelete {
            collection: Collection::Students,
            ids: existing.clone(),
        }])?;
        info!("Deleted {} student(s)", existing.len());
        Ok(existing.len())
    }

    // ==================== Circulation ====================

    pub fn issue_book(&mut self, student_id: i64, book_id: i64) -> LibraryResult<Loan> {
        self.check(Action::IssueBook)?;
        let snapshot = self.fresh_snapshot()?;
        let today = self.today();

        self.invalidate();
        circulation::issue(&mut self.store, &snapshot, student_id, book_id, today)
    }

    /// Return a book
    ///
    /// When a fine is owed nothing is written and the caller gets a
    /// [`FineNotice`] to pass to [`Self::confirm_payment`].
    pub fn return_book(&mut self, loan_id: i64) -> LibraryResult<ReturnOutcome> {
        self.check(Action::ReturnBook)?;
        let snapshot = self.fresh_snapshot()?;
        let today = self.today();

        match circulation::assess_return(&snapshot, loan_id, today)? {
            ReturnDecision::Ready(loan) => {
                self.invalidate();
                let receipt = circulation::commit_return(&mut self.store, loan, 0, today)?;
                Ok(ReturnOutcome::Returned(receipt))
            }
            ReturnDecision::PaymentRequired(notice) => {
                info!(
                    "Return of loan {} awaits payment of {}",
                    notice.loan_id, notice.amount
                );
                Ok(ReturnOutcome::PaymentRequired(notice))
            }
        }
    }

    /// Record payment of the fine in `notice` and complete the return
    pub fn confirm_payment(&mut self, notice: &FineNotice) -> LibraryResult<ReturnReceipt> {
        self.check(Action::ReturnBook)?;
        let snapshot = self.fresh_snapshot()?;
        let today = self.today();

        let loan = circulation::settle_fine(&snapshot, notice, today)?;
        self.invalidate();
        circulation::commit_return(&mut self.store, loan, notice.amount, today)
    }

    // ==================== Notifications ====================

    /// Compose the alert for one loan; `None` when it needs no chasing
    pub fn notify(&self, loan_id: i64) -> LibraryResult<Option<Notification>> {
        self.check(Action::SendNotification)?;
        let today = self.today();
        self.with_snapshot(|s| -> LibraryResult<Option<Notification>> {
            let loan = s.loan(loan_id).ok_or(LibraryError::LoanNotFound(loan_id))?;
            let note = notify::compose(loan, s.student(loan.student_id), today);
            if let Some(note) = &note {
                info!("Notification for loan {}: {}", loan_id, note.message);
            }
            Ok(note)
        })?
    }

    /// Alerts for every loan that is overdue or due soon
    pub fn notify_all(&self) -> LibraryResult<Vec<Notification>> {
        self.check(Action::SendNotification)?;
        let today = self.today();
        self.with_snapshot(|s| {
            s.loans
                .iter()
                .filter_map(|loan| notify::compose(loan, s.student(loan.student_id), today))
                .collect()
        })
    }

    // ==================== Backup ====================

    pub fn export(&self) -> LibraryResult<ExportDocument> {
        self.check(Action::ExportData)?;
        let now = self.clock.now();
        self.with_snapshot(|s| transfer::export(s, now))
    }

    /// Append the contents of a backup document
    ///
    /// The document is fully validated first; a rejected document writes
    /// nothing.
    pub fn import(&mut self, document: &Value) -> LibraryResult<ImportSummary> {
        self.check(Action::ImportData)?;
        let plan = transfer::plan_import(document)?;
        self.commit(plan.ops)?;
        info!(
            "Imported {} book(s), {} student(s), {} loan(s)",
            plan.summary.books, plan.summary.students, plan.summary.loans
        );
        Ok(plan.summary)
    }

    // ==================== Internals ====================

    fn check(&self, action: Action) -> LibraryResult<()> {
        authorize(self.role, action)
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> LibraryResult<T> {
        let mut cache = self.cache.borrow_mut();
        let snapshot = match cache.take() {
            Some(snapshot) => snapshot,
            None => Snapshot::load(&self.store)?,
        };
        let result = f(&snapshot);
        *cache = Some(snapshot);
        Ok(result)
    }

    fn fresh_snapshot(&self) -> LibraryResult<Snapshot> {
        Ok(Snapshot::load(&self.store)?)
    }

    fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }

    fn create(&mut self, record: NewRecord) -> LibraryResult<i64> {
        self.invalidate();
        Ok(self.store.create(record)?)
    }

    fn commit(&mut self, ops: Vec<WriteOp>) -> LibraryResult<Vec<i64>> {
        self.invalidate();
        circulation::commit(&mut self.store, ops)
    }
}

fn required(field: &str, value: &str) -> LibraryResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LibraryError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StatusFilter;
    use crate::clock::FixedClock;
    use crate::fines::Standing;
    use crate::models::BookStatus;
    use serde_json::json;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    /// Demo library as of 2024-01-13
    fn demo_library(temp_dir: &TempDir) -> Library {
        Library::open_with_clock(&test_config(temp_dir), FixedClock(date(2024, 1, 13))).unwrap()
    }

    fn empty_library() -> Library {
        let mut library = Library::open_in_memory().unwrap();
        library.set_clock(FixedClock(date(2024, 1, 3)));
        library
    }

    /// Check that every issued book has exactly one loan and vice versa
    fn assert_consistent(library: &Library) {
        let snapshot = library.snapshot().unwrap();
        for book in &snapshot.books {
            let loans = snapshot.loans.iter().filter(|l| l.book_id == book.id).count();
            let expected = if book.status == BookStatus::Issued { 1 } else { 0 };
            assert_eq!(loans, expected, "book {} out of sync", book.id);
        }
    }

    #[test]
    fn test_new_database_is_seeded_once() {
        let temp_dir = TempDir::new().unwrap();
        let library = demo_library(&temp_dir);

        let stats = library.stats().unwrap();
        assert_eq!(stats.total_books, 7);
        assert_eq!(stats.issued_books, 3);
        assert_eq!(stats.students, 4);
        assert_eq!(stats.overdue_loans, 2);
        drop(library);

        let library = demo_library(&temp_dir);
        assert_eq!(library.books().unwrap().len(), 7);
        assert_consistent(&library);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            seed_demo_data: false,
            ..test_config(&temp_dir)
        };
        let library = Library::open_with_config(&config).unwrap();
        assert!(library.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_issue_and_return_on_time() {
        let mut library = empty_library();
        let book = library.add_book("Clean Code", "Robert C. Martin").unwrap();
        let student = library
            .register_student("Arun Kumar", "BCA", None, None)
            .unwrap();

        let loan = library.issue_book(student.id, book.id).unwrap();
        assert_eq!(loan.due_date, date(2024, 1, 10));
        assert_eq!(library.stats().unwrap().issued_books, 1);
        assert_consistent(&library);

        library.set_clock(FixedClock(date(2024, 1, 10)));
        let receipt = match library.return_book(loan.id).unwrap() {
            ReturnOutcome::Returned(receipt) => receipt,
            other => panic!("expected immediate return, got {:?}", other),
        };
        assert_eq!(receipt.fine_paid, 0);
        assert!(library.loans().unwrap().is_empty());
        assert_eq!(library.stats().unwrap().available_books, 1);
        assert_consistent(&library);
    }

    #[test]
    fn test_late_return_goes_through_payment() {
        let mut library = empty_library();
        let book = library.add_book("Clean Code", "Robert C. Martin").unwrap();
        let student = library
            .register_student("Arun Kumar", "BCA", None, None)
            .unwrap();
        let loan = library.issue_book(student.id, book.id).unwrap();

        library.set_clock(FixedClock(date(2024, 1, 13)));
        let notice = match library.return_book(loan.id).unwrap() {
            ReturnOutcome::PaymentRequired(notice) => notice,
            other => panic!("expected payment gate, got {:?}", other),
        };
        assert_eq!(notice.amount, 30);
        assert_eq!(library.loans().unwrap().len(), 1);

        let receipt = library.confirm_payment(&notice).unwrap();
        assert_eq!(receipt.fine_paid, 30);
        assert!(library.loans().unwrap().is_empty());

        // Confirming twice finds no loan
        let err = library.confirm_payment(&notice).unwrap_err();
        assert!(matches!(err, LibraryError::LoanNotFound(_)));
        assert_consistent(&library);
    }

    #[test]
    fn test_issue_errors_leave_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = demo_library(&temp_dir);
        let before = library.snapshot().unwrap();

        // "C Programming" is already on loan in the demo data
        let err = library.issue_book(4, 2).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotAvailable { id: 2, .. }));

        let err = library.issue_book(99, 1).unwrap_err();
        assert!(matches!(err, LibraryError::StudentNotFound(99)));

        assert_eq!(library.snapshot().unwrap(), before);
    }

    #[test]
    fn test_search_and_arrivals() {
        let temp_dir = TempDir::new().unwrap();
        let library = demo_library(&temp_dir);

        let found = library
            .search_books(&BookFilter::new("prog", StatusFilter::All))
            .unwrap();
        let titles: Vec<&str> = found.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["C Programming", "The Pragmatic Programmer"]);

        let available = library
            .search_books(&BookFilter::new("", StatusFilter::Available))
            .unwrap();
        assert_eq!(available.len(), 4);

        let arrivals = library.new_arrivals().unwrap();
        assert_eq!(arrivals.len(), 5);
        assert_eq!(arrivals[0].title, "Introduction to Algorithms");
    }

    #[test]
    fn test_loan_views_carry_fines() {
        let temp_dir = TempDir::new().unwrap();
        let library = demo_library(&temp_dir);

        let loans = library.loans().unwrap();
        assert_eq!(loans[0].standing, Standing::Overdue);
        assert_eq!(loans[0].fine, 30);
        assert_eq!(loans[1].standing, Standing::Active);
        assert_eq!(loans[2].fine, 130);
    }

    #[test]
    fn test_cannot_delete_referenced_records() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = demo_library(&temp_dir);

        let err = library.delete_books(&[1, 2]).unwrap_err();
        assert!(matches!(err, LibraryError::BookOnLoan { id: 2, .. }));
        assert_eq!(library.books().unwrap().len(), 7);

        let err = library.delete_student(1).unwrap_err();
        assert!(matches!(err, LibraryError::StudentHasLoans { loans: 1, .. }));

        assert_eq!(library.delete_books(&[1, 3, 500]).unwrap(), 2);
        assert_eq!(library.books().unwrap().len(), 5);

        // Sneha has no loans
        library.delete_student(4).unwrap();
        assert_eq!(library.students().unwrap().len(), 3);

        let err = library.delete_book(1).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound(1)));
        assert_consistent(&library);
    }

    #[test]
    fn test_validation() {
        let mut library = empty_library();
        assert!(matches!(
            library.add_book("  ", "Someone"),
            Err(LibraryError::Validation(_))
        ));
        assert!(matches!(
            library.register_student("Arun Kumar", "", None, None),
            Err(LibraryError::Validation(_))
        ));
        assert!(library.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_update_book_keeps_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = demo_library(&temp_dir);

        let book = library
            .update_book(2, Some("The C Programming Language"), None)
            .unwrap();
        assert_eq!(book.title, "The C Programming Language");
        assert_eq!(book.author, "Dennis Ritchie");
        assert_eq!(book.status, BookStatus::Issued);

        let err = library.update_book(77, Some("Nope"), None).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound(77)));
    }

    #[test]
    fn test_notifications() {
        let temp_dir = TempDir::new().unwrap();
        let library = demo_library(&temp_dir);

        let alert = library.notify(1).unwrap().unwrap();
        assert!(alert.message.starts_with("Alert sent! SMS to +91 98765 43210"));
        assert!(alert.message.ends_with("Fine Amount: ₹30"));

        assert!(library.notify(2).unwrap().is_none());
        assert!(matches!(
            library.notify(42),
            Err(LibraryError::LoanNotFound(42))
        ));
        assert_eq!(library.notify_all().unwrap().len(), 2);
    }

    #[test]
    fn test_user_role_is_restricted() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = demo_library(&temp_dir);
        library.set_role(Role::User);

        assert_eq!(library.books().unwrap().len(), 7);
        assert!(library.stats().is_ok());
        assert_eq!(library.profile().unwrap().email, "user@library.edu");

        assert!(matches!(
            library.issue_book(4, 1),
            Err(LibraryError::Forbidden { .. })
        ));
        assert!(matches!(
            library.students(),
            Err(LibraryError::Forbidden { .. })
        ));
        assert!(matches!(
            library.export(),
            Err(LibraryError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let source = demo_library(&temp_dir);
        let document = serde_json::to_value(source.export().unwrap()).unwrap();
        assert_eq!(document["timestamp"], "2024-01-13T00:00:00.000Z");

        let mut target = empty_library();
        let summary = target.import(&document).unwrap();
        assert_eq!(summary.books, 7);
        assert_eq!(summary.loans, 3);

        let stats = |lib: &Library| {
            let mut stats = lib.stats().unwrap();
            stats.overdue_loans = 0;
            stats.due_soon_loans = 0;
            stats
        };
        assert_eq!(stats(&target), stats(&source));
        assert_consistent(&target);
    }

    #[test]
    fn test_rejected_import_writes_nothing() {
        let mut library = empty_library();

        let err = library.import(&json!("just a string")).unwrap_err();
        assert!(matches!(err, LibraryError::Import(_)));

        let err = library
            .import(&json!({"books": [{"title": "A", "author": "B"}], "students": []}))
            .unwrap_err();
        assert!(matches!(err, LibraryError::Import(_)));

        let err = library
            .import(&json!({
                "books": [{"title": "A", "author": "B"}],
                "students": [],
                "issuedBooks": [{"studentName": "Ghost", "bookName": "A",
                                 "issueDate": "2024-01-01", "dueDate": "2024-01-08"}]
            }))
            .unwrap_err();
        assert!(matches!(err, LibraryError::Import(_)));

        assert!(library.snapshot().unwrap().is_empty());
    }
}
