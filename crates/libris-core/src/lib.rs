//! Libris Core Library
//!
//! This crate provides the core of Libris, a small library-management
//! system: a catalog of books, registered students, and the circulation
//! rules that lend books out, take them back and charge fines for late
//! returns.
//!
//! # Architecture
//!
//! - **SQLite**: Single source of truth, one transaction per grouped write
//! - **Snapshot**: In-memory copy of all records, used for reads and planning
//!
//! # Quick Start
//!
//! ```text
//! let mut library = Library::open()?;
//!
//! let book = library.add_book("Clean Code", "Robert C. Martin")?;
//! let student = library.register_student("Arun Kumar", "BCA", None, None)?;
//! let loan = library.issue_book(student.id, book.id)?;
//!
//! let stats = library.stats()?;
//! ```
//!
//! # Modules
//!
//! - `library`: Facade tying store, clock and role together (main entry point)
//! - `circulation`: Issue and return rules
//! - `fines`: Due dates, overdue days and fines
//! - `catalog`: Snapshots, search and dashboard statistics
//! - `transfer`: JSON backup export and import
//! - `storage`: Entity store contract and its SQLite implementation
//! - `access`: Roles and permissions
//! - `config`: Application configuration

pub mod access;
pub mod catalog;
pub mod circulation;
pub mod clock;
pub mod config;
pub mod error;
pub mod fines;
pub mod library;
pub mod models;
pub mod notify;
pub mod seed;
pub mod storage;
pub mod transfer;

pub use access::{Action, Role, UserProfile};
pub use catalog::{BookFilter, LibraryStats, LoanView, Snapshot, StatusFilter};
pub use circulation::{FineNotice, ReturnOutcome, ReturnReceipt};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{LibraryError, LibraryResult};
pub use fines::{FineAssessment, Standing, FINE_PER_DAY, LOAN_PERIOD_DAYS};
pub use library::Library;
pub use models::{Book, BookStatus, Loan, Student};
pub use notify::{Notification, NotificationKind};
pub use storage::{EntityStore, SqliteStore, StorageError};
pub use transfer::{ExportDocument, ImportError, ImportSummary};
