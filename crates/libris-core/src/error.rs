//! Library operation errors

use thiserror::Error;

use crate::access::{Action, Role};
use crate::models::BookStatus;
use crate::storage::StorageError;
use crate::transfer::ImportError;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book {0} not found")]
    BookNotFound(i64),

    #[error("Student {0} not found")]
    StudentNotFound(i64),

    #[error("Loan {0} not found")]
    LoanNotFound(i64),

    #[error("\"{title}\" cannot be issued: it is currently {status}")]
    BookNotAvailable {
        id: i64,
        title: String,
        status: BookStatus,
    },

    #[error("\"{title}\" is on loan and cannot be deleted until it is returned")]
    BookOnLoan { id: i64, title: String },

    #[error("{name} has {loans} book(s) on loan and cannot be deleted")]
    StudentHasLoans { id: i64, name: String, loans: usize },

    #[error("Fine for loan {loan_id} is now {current}, not the quoted {quoted}")]
    FineChanged {
        loan_id: i64,
        quoted: i64,
        current: i64,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Access restricted: the {role} role may not {}", .action.describe())]
    Forbidden { role: Role, action: Action },

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LibraryError {
    /// A referenced book, student or loan does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LibraryError::BookNotFound(_)
                | LibraryError::StudentNotFound(_)
                | LibraryError::LoanNotFound(_)
        )
    }
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
