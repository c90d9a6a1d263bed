//! Book command handlers

use anyhow::{bail, Context, Result};

use libris_core::{Action, BookFilter, Library, StatusFilter};

use crate::output::Output;
use crate::prompt::confirm;

/// Add a book to the catalog
pub fn add(library: &mut Library, title: String, author: String, output: &Output) -> Result<()> {
    let book = library
        .add_book(&title, &author)
        .context("Failed to add book")?;

    output.success(&format!("Added book: {}", book.id));
    output.print_book(&book);
    Ok(())
}

/// List books, optionally filtered by text and status
pub fn list(
    library: &Library,
    search: Option<String>,
    status: StatusFilter,
    output: &Output,
) -> Result<()> {
    let filter = BookFilter::new(search.unwrap_or_default(), status);
    let books = library.search_books(&filter)?;

    output.print_books(&books);
    Ok(())
}

/// Change a book's title or author
pub fn edit(
    library: &mut Library,
    id: i64,
    title: Option<String>,
    author: Option<String>,
    output: &Output,
) -> Result<()> {
    if title.is_none() && author.is_none() {
        bail!("Nothing to change. Pass --title and/or --author.");
    }

    let book = library
        .update_book(id, title.as_deref(), author.as_deref())
        .context("Failed to update book")?;

    output.success(&format!("Updated book: {}", book.id));
    output.print_book(&book);
    Ok(())
}

/// Delete one or more books
pub fn delete(library: &mut Library, ids: Vec<i64>, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() && library.role().permits(Action::ManageBooks) {
        let snapshot = library.snapshot()?;
        for id in &ids {
            if let Some(book) = snapshot.book(*id) {
                println!("Delete book: {} - {}", book.id, book.title);
            }
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = match ids.as_slice() {
        [id] => library.delete_book(*id).map(|_| 1),
        _ => library.delete_books(&ids),
    }
    .context("Failed to delete books")?;

    output.success(&format!("Deleted {} book(s)", deleted));
    Ok(())
}
