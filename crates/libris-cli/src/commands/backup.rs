//! Export and import command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use libris_core::transfer::{backup_file_name, read_backup, write_backup};
use libris_core::Library;

use crate::output::Output;

/// Write a JSON backup of the whole library
pub fn export(library: &Library, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let document = library.export()?;
    let path = path.unwrap_or_else(|| PathBuf::from(backup_file_name(library.today())));

    write_backup(&path, &document)
        .with_context(|| format!("Failed to write backup to {:?}", path))?;

    output.print_value(
        &serde_json::json!({
            "path": path,
            "books": document.books.len(),
            "students": document.students.len(),
            "issuedBooks": document.issued_books.len(),
        }),
        &format!(
            "Exported {} book(s), {} student(s) and {} loan(s) to {}",
            document.books.len(),
            document.students.len(),
            document.issued_books.len(),
            path.display()
        ),
    );
    Ok(())
}

/// Append the records of a JSON backup
pub fn import(library: &mut Library, path: &Path, output: &Output) -> Result<()> {
    let document = read_backup(path).with_context(|| format!("Failed to read {:?}", path))?;
    let summary = library
        .import(&document)
        .with_context(|| format!("Failed to import {:?}", path))?;

    output.print_value(
        &summary,
        &format!(
            "Imported {} book(s), {} student(s) and {} loan(s)",
            summary.books, summary.students, summary.loans
        ),
    );
    Ok(())
}
