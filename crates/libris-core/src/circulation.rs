//! Circulation engine
//!
//! A book moves `Available --issue--> Issued --return--> Available` and
//! nothing else. Each transition touches two records (the loan and the
//! book) and is committed as one grouped write.
//!
//! Planning is kept separate from committing: the `plan_*` / `assess_*`
//! functions validate against a [`Snapshot`] and produce the write group;
//! [`commit`] hands it to the store.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::catalog::Snapshot;
use crate::error::{LibraryError, LibraryResult};
use crate::fines::{due_date_for, FineAssessment};
use crate::models::{BookPatch, BookStatus, Loan, NewLoan};
use crate::storage::{Collection, EntityStore, NewRecord, RecordRef, StorageError, WriteOp};

/// A validated issue, ready to commit
#[derive(Debug, Clone, PartialEq)]
pub struct IssuePlan {
    pub book_id: i64,
    pub student_id: i64,
    pub loan: NewLoan,
}

impl IssuePlan {
    /// Create the loan and mark the book issued
    pub fn ops(&self) -> Vec<WriteOp> {
        vec![
            WriteOp::Create(NewRecord::Loan(self.loan.clone())),
            WriteOp::UpdateBook {
                id: self.book_id,
                patch: BookPatch::status(BookStatus::Issued),
            },
        ]
    }

    /// The stored loan once the store has assigned its id
    pub fn into_loan(self, id: i64) -> Loan {
        Loan {
            id,
            book_id: self.book_id,
            student_id: self.student_id,
            student_name: self.loan.student_name,
            book_name: self.loan.book_name,
            issue_date: self.loan.issue_date,
            due_date: self.loan.due_date,
        }
    }
}

/// Validate an issue request against the current state
///
/// Fails with `StudentNotFound` / `BookNotFound` when an id does not
/// resolve and `BookNotAvailable` when the book is already lent out.
pub fn plan_issue(
    snapshot: &Snapshot,
    student_id: i64,
    book_id: i64,
    today: NaiveDate,
) -> LibraryResult<IssuePlan> {
    let student = snapshot
        .student(student_id)
        .ok_or(LibraryError::StudentNotFound(student_id))?;
    let book = snapshot
        .book(book_id)
        .ok_or(LibraryError::BookNotFound(book_id))?;

    if !book.is_available() {
        return Err(LibraryError::BookNotAvailable {
            id: book.id,
            title: book.title.clone(),
            status: book.status,
        });
    }

    Ok(IssuePlan {
        book_id,
        student_id,
        loan: NewLoan {
            book: RecordRef::Id(book_id),
            student: RecordRef::Id(student_id),
            student_name: student.name.clone(),
            book_name: book.title.clone(),
            issue_date: today,
            due_date: due_date_for(today),
        },
    })
}

/// Fine owed on a loan, shown to the librarian before the return goes ahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FineNotice {
    pub loan_id: i64,
    pub book_name: String,
    pub student_name: String,
    pub due_date: NaiveDate,
    pub overdue_days: i64,
    pub amount: i64,
}

/// First step of a return
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnDecision {
    /// No fine is owed; the return can be committed straight away
    Ready(Loan),
    /// A fine is owed and payment must be confirmed first
    PaymentRequired(FineNotice),
}

/// Decide whether a return can proceed or needs a payment first
pub fn assess_return(
    snapshot: &Snapshot,
    loan_id: i64,
    today: NaiveDate,
) -> LibraryResult<ReturnDecision> {
    let loan = snapshot
        .loan(loan_id)
        .ok_or(LibraryError::LoanNotFound(loan_id))?;
    let assessment = FineAssessment::assess(loan.due_date, today);

    if !assessment.is_due() {
        return Ok(ReturnDecision::Ready(loan.clone()));
    }

    Ok(ReturnDecision::PaymentRequired(FineNotice {
        loan_id: loan.id,
        book_name: loan.book_name.clone(),
        student_name: loan.student_name.clone(),
        due_date: loan.due_date,
        overdue_days: assessment.overdue_days,
        amount: assessment.amount,
    }))
}

/// Check a payment confirmation against the loan as it stands today
///
/// The loan must still exist and the fine must not have changed since the
/// notice was produced (for instance because the date rolled over).
pub fn settle_fine(
    snapshot: &Snapshot,
    notice: &FineNotice,
    today: NaiveDate,
) -> LibraryResult<Loan> {
    let loan = snapshot
        .loan(notice.loan_id)
        .ok_or(LibraryError::LoanNotFound(notice.loan_id))?;
    let current = FineAssessment::assess(loan.due_date, today).amount;

    if current != notice.amount {
        return Err(LibraryError::FineChanged {
            loan_id: loan.id,
            quoted: notice.amount,
            current,
        });
    }

    Ok(loan.clone())
}

/// Delete the loan and put its book back on the shelf
pub fn return_ops(loan: &Loan) -> Vec<WriteOp> {
    vec![
        WriteOp::Delete {
            collection: Collection::Loans,
            id: loan.id,
        },
        WriteOp::UpdateBook {
            id: loan.book_id,
            patch: BookPatch::status(BookStatus::Available),
        },
    ]
}

/// Outcome of a completed return
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    pub loan: Loan,
    pub returned_on: NaiveDate,
    pub fine_paid: i64,
}

/// Result of asking to return a book
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Returned(ReturnReceipt),
    PaymentRequired(FineNotice),
}

/// Issue a book: plan against `snapshot`, then commit to `store`
pub fn issue<S: EntityStore + ?Sized>(
    store: &mut S,
    snapshot: &Snapshot,
    student_id: i64,
    book_id: i64,
    today: NaiveDate,
) -> LibraryResult<Loan> {
    let plan = plan_issue(snapshot, student_id, book_id, today)?;
    let created = store.run_atomically(plan.ops())?;
    let loan_id = created
        .first()
        .copied()
        .ok_or(StorageError::UnresolvedReference { index: 0 })?;

    let loan = plan.into_loan(loan_id);
    info!(
        "Issued \"{}\" to {} (loan {}, due {})",
        loan.book_name, loan.student_name, loan.id, loan.due_date
    );
    Ok(loan)
}

/// Commit a return for `loan`, recording the fine collected
pub fn commit_return<S: EntityStore + ?Sized>(
    store: &mut S,
    loan: Loan,
    fine_paid: i64,
    today: NaiveDate,
) -> LibraryResult<ReturnReceipt> {
    commit(store, return_ops(&loan))?;
    info!(
        "Returned \"{}\" from {} (loan {}, fine {})",
        loan.book_name, loan.student_name, loan.id, fine_paid
    );
    Ok(ReturnReceipt {
        loan,
        returned_on: today,
        fine_paid,
    })
}

/// Apply a write group produced by the planner
pub fn commit<S: EntityStore + ?Sized>(
    store: &mut S,
    ops: Vec<WriteOp>,
) -> LibraryResult<Vec<i64>> {
    Ok(store.run_atomically(ops)?)
}
