//! Data models for Libris
//!
//! Defines the three stored collections (books, students, loans) along with
//! the draft types used to create them and the patch types used to update
//! individual fields.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::RecordRef;

/// Email domain used when a student registers without an address
pub const DEFAULT_EMAIL_DOMAIN: &str = "library.edu";

/// Phone number recorded when a student registers without one
pub const DEFAULT_PHONE: &str = "+91 00000 00000";

/// Availability of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    /// On the shelf, can be issued
    #[default]
    Available,
    /// Lent out under an active loan
    Issued,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Issued" => Ok(BookStatus::Issued),
            other => Err(format!("unknown book status: {}", other)),
        }
    }
}

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

/// A registered student (borrower)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
}

/// An active loan ("issued book record")
///
/// `book_id` and `student_id` are the authoritative references. The name
/// fields are copies taken when the book was issued and are kept for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub book_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// A book that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

impl NewBook {
    /// A new catalog entry; always starts out available
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
        }
    }
}

/// A student that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
}

impl NewStudent {
    /// Build a registration, filling in contact details left blank
    ///
    /// A missing email becomes `first.rest@library.edu` (the name lowercased
    /// with its first space replaced by a dot); a missing phone becomes
    /// [`DEFAULT_PHONE`].
    pub fn register(
        name: impl Into<String>,
        course: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        let name = name.into();
        let email = email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| default_email(&name));
        let phone = phone
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PHONE.to_string());

        Self {
            name,
            course: course.into(),
            email,
            phone,
        }
    }
}

fn default_email(name: &str) -> String {
    let local = name.to_lowercase().replacen(' ', ".", 1);
    format!("{}@{}", local, DEFAULT_EMAIL_DOMAIN)
}

/// A loan that has not been stored yet
///
/// The book and student may refer to records created earlier in the same
/// grouped write (see [`RecordRef::Batch`]).
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub book: RecordRef,
    pub student: RecordRef,
    pub student_name: String,
    pub book_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Partial update of a book; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<BookStatus>,
}

impl BookPatch {
    pub fn status(status: BookStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
