//! SQLite-backed entity store
//!
//! Each call to [`EntityStore::run_atomically`] runs inside one SQLite
//! transaction. Returning early with an error drops the transaction, which
//! rolls back every write made so far in the group.
//!
//! ## Tables
//!
//! - `books` - Catalog entries and their availability
//! - `students` - Registered borrowers
//! - `issued_books` - Active loans

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row, Transaction};
use tracing::debug;

use crate::config::Config;
use crate::models::{Book, BookPatch, BookStatus, Loan, NewLoan, Student};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::schema::{init_schema, needs_init};
use crate::storage::{Collection, EntityStore, NewRecord, RecordRef, WriteOp};

/// Entity store persisted in a single SQLite file
pub struct SqliteStore {
    conn: Connection,
    created: bool,
}

impl SqliteStore {
    /// Open or create the SQLite database
    pub fn open(config: &Config) -> StorageResult<Self> {
        let path = config.database_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path)?;
        debug!("Opened library database at {:?}", path);
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let created = needs_init(&conn);
        if created {
            init_schema(&conn)?;
        }

        Ok(Self { conn, created })
    }

    /// Whether this open initialized a brand-new database
    pub fn was_created(&self) -> bool {
        self.created
    }
}

impl EntityStore for SqliteStore {
    fn list_books(&self) -> StorageResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, status FROM books ORDER BY id")?;
        let books = stmt
            .query_map([], book_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }

    fn list_students(&self) -> StorageResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, course, email, phone FROM students ORDER BY id")?;
        let students = stmt
            .query_map([], student_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    fn list_loans(&self) -> StorageResult<Vec<Loan>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, book_id, student_id, student_name, book_name, issue_date, due_date
            FROM issued_books
            ORDER BY id
            "#,
        )?;
        let loans = stmt
            .query_map([], loan_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(loans)
    }

    fn run_atomically(&mut self, ops: Vec<WriteOp>) -> StorageResult<Vec<i64>> {
        let tx = self.conn.transaction()?;
        let count = ops.len();

        let mut created = Vec::new();
        for op in ops {
            apply(&tx, op, &mut created)?;
        }

        tx.commit()?;
        debug!("Committed write group of {} operation(s)", count);
        Ok(created)
    }
}

// ==================== Writes ====================

fn apply(tx: &Transaction, op: WriteOp, created: &mut Vec<i64>) -> StorageResult<()> {
    match op {
        WriteOp::Create(record) => {
            let id = insert_record(tx, record, created)?;
            created.push(id);
        }
        WriteOp::Delete { collection, id } => {
            let sql = format!("DELETE FROM {} WHERE id = ?", collection.table());
            if tx.execute(&sql, params![id])? == 0 {
                return Err(StorageError::RecordNotFound { collection, id });
            }
        }
        WriteOp::BulkDelete { collection, ids } => {
            let sql = format!("DELETE FROM {} WHERE id = ?", collection.table());
            let mut stmt = tx.prepare(&sql)?;
            for id in ids {
                stmt.execute(params![id])?;
            }
        }
        WriteOp::UpdateBook { id, patch } => update_book(tx, id, patch)?,
    }
    Ok(())
}

fn insert_record(tx: &Transaction, record: NewRecord, created: &[i64]) -> StorageResult<i64> {
    match record {
        NewRecord::Book(book) => {
            tx.execute(
                "INSERT INTO books (title, author, status) VALUES (?, ?, ?)",
                params![book.title, book.author, book.status],
            )?;
        }
        NewRecord::Student(student) => {
            tx.execute(
                "INSERT INTO students (name, course, email, phone) VALUES (?, ?, ?, ?)",
                params![student.name, student.course, student.email, student.phone],
            )?;
        }
        NewRecord::Loan(loan) => insert_loan(tx, loan, created)?,
    }
    Ok(tx.last_insert_rowid())
}

fn insert_loan(tx: &Transaction, loan: NewLoan, created: &[i64]) -> StorageResult<()> {
    let book_id = resolve(loan.book, created)?;
    let student_id = resolve(loan.student, created)?;

    tx.execute(
        r#"
        INSERT INTO issued_books
            (book_id, student_id, student_name, book_name, issue_date, due_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
        params![
            book_id,
            student_id,
            loan.student_name,
            loan.book_name,
            loan.issue_date,
            loan.due_date
        ],
    )?;
    Ok(())
}

fn update_book(tx: &Transaction, id: i64, patch: BookPatch) -> StorageResult<()> {
    let changed = tx.execute(
        r#"
        UPDATE books
        SET title = COALESCE(?1, title),
            author = COALESCE(?2, author),
            status = COALESCE(?3, status)
        WHERE id = ?4
        "#,
        params![patch.title, patch.author, patch.status, id],
    )?;

    if changed == 0 {
        return Err(StorageError::RecordNotFound {
            collection: Collection::Books,
            id,
        });
    }
    Ok(())
}

fn resolve(reference: RecordRef, created: &[i64]) -> StorageResult<i64> {
    match reference {
        RecordRef::Id(id) => Ok(id),
        RecordRef::Batch(index) => created
            .get(index)
            .copied()
            .ok_or(StorageError::UnresolvedReference { index }),
    }
}

// ==================== Row mapping ====================

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        status: row.get(3)?,
    })
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        course: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
    })
}

fn loan_from_row(row: &Row<'_>) -> rusqlite::Result<Loan> {
    Ok(Loan {
        id: row.get(0)?,
        book_id: row.get(1)?,
        student_id: row.get(2)?,
        student_name: row.get(3)?,
        book_name: row.get(4)?,
        issue_date: row.get(5)?,
        due_date: row.get(6)?,
    })
}

impl ToSql for BookStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BookStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}
