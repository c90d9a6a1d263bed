//! Backup export and import
//!
//! The whole library is exchanged as a single JSON document:
//!
//! ```json
//! { "books": [...], "students": [...], "issuedBooks": [...],
//!   "version": 1, "timestamp": "2024-01-13T09:30:00.000Z" }
//! ```
//!
//! Import is additive. Ids in the document are only used to match loans to
//! the books and students of the same document; the store assigns fresh ids
//! to everything it inserts.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::Snapshot;
use crate::error::LibraryResult;
use crate::models::{Book, BookStatus, Loan, NewBook, NewLoan, NewStudent, Student};
use crate::storage::{NewRecord, RecordRef, StorageError, StorageResult, WriteOp};

/// Version written to and accepted from backup documents
pub const EXPORT_VERSION: u64 = 1;

const BOOKS: &str = "books";
const STUDENTS: &str = "students";
const LOANS: &str = "issuedBooks";

/// Reasons a backup document is rejected
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("backup is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backup must be a JSON object")]
    NotAnObject,

    #[error("backup has no '{0}' collection")]
    MissingCollection(&'static str),

    #[error("'{0}' must be an array")]
    NotAnArray(&'static str),

    #[error("unsupported backup version {0} (expected 1)")]
    UnsupportedVersion(String),

    #[error("entry {index} of '{collection}' is invalid: {source}")]
    InvalidRecord {
        collection: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("loan {index} refers to book {reference}, which is not in the backup")]
    UnresolvedBook { index: usize, reference: String },

    #[error("loan {index} refers to student {reference}, which is not in the backup")]
    UnresolvedStudent { index: usize, reference: String },

    #[error("loan {index} lends \"{title}\", which is already on loan earlier in the backup")]
    DuplicateLoan { index: usize, title: String },
}

impl ImportError {
    /// How to repair a document that failed to import, if there is a fix
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ImportError::UnresolvedBook { .. } => Some(
                "Every entry in 'issuedBooks' must name a book listed in 'books'. \
                 Add the missing book or remove the loan.",
            ),
            ImportError::UnresolvedStudent { .. } => Some(
                "The borrower is missing from 'students', which happens when a student \
                 was deleted while holding a book. Add the student back or remove the loan.",
            ),
            ImportError::DuplicateLoan { .. } => Some(
                "A book can only be on loan once. Remove the extra entry from 'issuedBooks' \
                 or add another copy of the book to 'books'.",
            ),
            ImportError::UnsupportedVersion(_) => {
                Some("Export the backup again with this version of libris.")
            }
            _ => None,
        }
    }
}

// ==================== Export ====================

/// Full contents of the library as written to a backup file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub books: Vec<Book>,
    pub students: Vec<Student>,
    pub issued_books: Vec<Loan>,
    pub version: u64,
    pub timestamp: String,
}

impl ExportDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Capture everything in `snapshot`
pub fn export(snapshot: &Snapshot, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        books: snapshot.books.clone(),
        students: snapshot.students.clone(),
        issued_books: snapshot.loans.clone(),
        version: EXPORT_VERSION,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Default file name for a backup taken on `date`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("library_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Write `document` to `path` without ever leaving a partial file behind
pub fn write_backup(path: &Path, document: &ExportDocument) -> StorageResult<()> {
    let json = document.to_json()?;
    atomic_write(path, json.as_bytes())
}

/// Read and parse a backup file
pub fn read_backup(path: &Path) -> LibraryResult<Value> {
    let text = fs::read_to_string(path)
        .map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;
    Ok(parse_document(&text)?)
}

/// Write data to a file atomically
///
/// The data goes to a temporary file next to `path`, is synced, and is then
/// renamed over the target.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    let io_err = |e: std::io::Error| StorageError::from_io(e, temp_path.clone());

    let mut file = File::create(&temp_path).map_err(io_err)?;
    file.write_all(data).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

// ==================== Import ====================

#[derive(Debug, Deserialize)]
struct BookEntry {
    #[serde(default)]
    id: Option<i64>,
    title: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct StudentEntry {
    #[serde(default)]
    id: Option<i64>,
    name: String,
    course: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoanEntry {
    #[serde(default)]
    book_id: Option<i64>,
    #[serde(default)]
    student_id: Option<i64>,
    student_name: String,
    book_name: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
}

/// What an import will add once committed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub books: usize,
    pub students: usize,
    pub loans: usize,
}

/// A validated import, ready to commit as one grouped write
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    pub ops: Vec<WriteOp>,
    pub summary: ImportSummary,
}

/// Parse a backup document from text
pub fn parse_document(text: &str) -> Result<Value, ImportError> {
    Ok(serde_json::from_str(text)?)
}

/// Validate `document` and turn it into store writes
///
/// The plan creates every book, then every student, then every loan, with
/// loans pointing at records created earlier in the same group. Books are
/// marked `Issued` exactly when a loan in the document lends them.
pub fn plan_import(document: &Value) -> Result<ImportPlan, ImportError> {
    let object = document.as_object().ok_or(ImportError::NotAnObject)?;
    check_version(object)?;

    let books: Vec<BookEntry> = entries(object, BOOKS)?;
    let students: Vec<StudentEntry> = entries(object, STUDENTS)?;
    let loans: Vec<LoanEntry> = entries(object, LOANS)?;

    let mut book_status = vec![BookStatus::Available; books.len()];
    let mut resolved = Vec::with_capacity(loans.len());
    for (index, loan) in loans.iter().enumerate() {
        let book = resolve_book(&books, &book_status, loan).ok_or_else(|| {
            ImportError::UnresolvedBook {
                index,
                reference: describe_ref(loan.book_id, &loan.book_name),
            }
        })?;
        let student =
            resolve_student(&students, loan).ok_or_else(|| ImportError::UnresolvedStudent {
                index,
                reference: describe_ref(loan.student_id, &loan.student_name),
            })?;

        if book_status[book] == BookStatus::Issued {
            return Err(ImportError::DuplicateLoan {
                index,
                title: books[book].title.clone(),
            });
        }
        book_status[book] = BookStatus::Issued;
        resolved.push((book, student));
    }

    let summary = ImportSummary {
        books: books.len(),
        students: students.len(),
        loans: loans.len(),
    };

    let mut ops = Vec::with_capacity(summary.books + summary.students + summary.loans);
    for (entry, status) in books.into_iter().zip(book_status) {
        let mut book = NewBook::new(entry.title, entry.author);
        book.status = status;
        ops.push(WriteOp::Create(NewRecord::Book(book)));
    }
    for entry in students {
        ops.push(WriteOp::Create(NewRecord::Student(NewStudent::register(
            entry.name,
            entry.course,
            entry.email,
            entry.phone,
        ))));
    }
    for (entry, (book, student)) in loans.into_iter().zip(resolved) {
        ops.push(WriteOp::Create(NewRecord::Loan(NewLoan {
            book: RecordRef::Batch(book),
            student: RecordRef::Batch(summary.books + student),
            student_name: entry.student_name,
            book_name: entry.book_name,
            issue_date: entry.issue_date,
            due_date: entry.due_date,
        })));
    }

    Ok(ImportPlan { ops, summary })
}

fn check_version(object: &Map<String, Value>) -> Result<(), ImportError> {
    match object.get("version") {
        None => Ok(()),
        Some(v) if v.as_u64() == Some(EXPORT_VERSION) => Ok(()),
        Some(other) => Err(ImportError::UnsupportedVersion(other.to_string())),
    }
}

fn entries<T: DeserializeOwned>(
    object: &Map<String, Value>,
    collection: &'static str,
) -> Result<Vec<T>, ImportError> {
    let items = object
        .get(collection)
        .ok_or(ImportError::MissingCollection(collection))?
        .as_array()
        .ok_or(ImportError::NotAnArray(collection))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|source| ImportError::InvalidRecord {
                collection,
                index,
                source,
            })
        })
        .collect()
}

/// Position of the loan's book in the document, by id first and then by title
///
/// A title match prefers a copy no earlier loan has claimed, so several
/// copies of one title can each be on loan.
fn resolve_book(books: &[BookEntry], status: &[BookStatus], loan: &LoanEntry) -> Option<usize> {
    if let Some(id) = loan.book_id {
        if let Some(index) = books.iter().position(|b| b.id == Some(id)) {
            return Some(index);
        }
    }
    let mut copies = (0..books.len()).filter(|&i| books[i].title == loan.book_name);
    let first = copies.next()?;
    if status[first] == BookStatus::Available {
        return Some(first);
    }
    copies
        .find(|&i| status[i] == BookStatus::Available)
        .or(Some(first))
}

fn resolve_student(students: &[StudentEntry], loan: &LoanEntry) -> Option<usize> {
    let by_id = loan
        .student_id
        .and_then(|id| students.iter().position(|s| s.id == Some(id)));
    by_id.or_else(|| students.iter().position(|s| s.name == loan.student_name))
}

fn describe_ref(id: Option<i64>, name: &str) -> String {
    match id {
        Some(id) => format!("{} (\"{}\")", id, name),
        None => format!("\"{}\"", name),
    }
}
