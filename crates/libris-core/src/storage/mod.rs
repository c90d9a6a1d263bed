//! Storage layer
//!
//! Defines the contract the library needs from a store ([`EntityStore`]) and
//! the SQLite implementation of it.
//!
//! ## Grouped writes
//!
//! Every mutation is expressed as a [`WriteOp`]. A list of operations passed
//! to [`EntityStore::run_atomically`] is applied as one unit: either all of
//! them become visible or, if any fails, none do. The single-record helpers
//! (`create`, `delete`, ...) are one-element groups.

pub mod error;
pub mod schema;
pub mod sqlite;

use std::fmt;

use crate::models::{Book, BookPatch, Loan, NewBook, NewLoan, NewStudent, Student};

pub use error::{StorageError, StorageResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
pub use sqlite::SqliteStore;

/// The three stored collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Students,
    Loans,
}

impl Collection {
    /// Table backing this collection
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Students => "students",
            Collection::Loans => "issued_books",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Books => "book",
            Collection::Students => "student",
            Collection::Loans => "loan",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Reference to a record from inside a grouped write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    /// A record that already exists
    Id(i64),
    /// The record created by the n-th `Create` operation of the same group
    Batch(usize),
}

impl From<i64> for RecordRef {
    fn from(id: i64) -> Self {
        RecordRef::Id(id)
    }
}

/// A record to insert; the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Book(NewBook),
    Student(NewStudent),
    Loan(NewLoan),
}

/// A single write inside a group
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert a record
    Create(NewRecord),
    /// Delete one record; fails if it does not exist
    Delete { collection: Collection, id: i64 },
    /// Delete every listed record that exists
    BulkDelete { collection: Collection, ids: Vec<i64> },
    /// Overwrite the given fields of a book; fails if it does not exist
    UpdateBook { id: i64, patch: BookPatch },
}

/// What the library requires from its persistence layer
pub trait EntityStore {
    fn list_books(&self) -> StorageResult<Vec<Book>>;

    fn list_students(&self) -> StorageResult<Vec<Student>>;

    fn list_loans(&self) -> StorageResult<Vec<Loan>>;

    /// Apply `ops` in order as one atomic unit
    ///
    /// Returns the ids assigned by the `Create` operations, in order.
    fn run_atomically(&mut self, ops: Vec<WriteOp>) -> StorageResult<Vec<i64>>;

    /// Insert a single record and return its id
    fn create(&mut self, record: NewRecord) -> StorageResult<i64> {
        self.run_atomically(vec![WriteOp::Create(record)])?
            .first()
            .copied()
            .ok_or(StorageError::UnresolvedReference { index: 0 })
    }

    fn delete(&mut self, collection: Collection, id: i64) -> StorageResult<()> {
        self.run_atomically(vec![WriteOp::Delete { collection, id }])?;
        Ok(())
    }

    fn bulk_delete(&mut self, collection: Collection, ids: Vec<i64>) -> StorageResult<()> {
        self.run_atomically(vec![WriteOp::BulkDelete { collection, ids }])?;
        Ok(())
    }

    fn update_fields(&mut self, id: i64, patch: BookPatch) -> StorageResult<()> {
        self.run_atomically(vec![WriteOp::UpdateBook { id, patch }])?;
        Ok(())
    }
}
