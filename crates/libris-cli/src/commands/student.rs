//! Student command handlers

use anyhow::{Context, Result};

use libris_core::{Action, Library};

use crate::output::Output;
use crate::prompt::confirm;

/// Register a new student
pub fn add(
    library: &mut Library,
    name: String,
    course: String,
    email: Option<String>,
    phone: Option<String>,
    output: &Output,
) -> Result<()> {
    let student = library
        .register_student(&name, &course, email.as_deref(), phone.as_deref())
        .context("Failed to register student")?;

    output.success(&format!("Registered student: {}", student.id));
    output.print_student(&student);
    Ok(())
}

pub fn list(library: &Library, output: &Output) -> Result<()> {
    let students = library.students()?;
    output.print_students(&students);
    Ok(())
}

/// Delete one or more students
pub fn delete(library: &mut Library, ids: Vec<i64>, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() && library.role().permits(Action::ManageStudents) {
        let snapshot = library.snapshot()?;
        for id in &ids {
            if let Some(student) = snapshot.student(*id) {
                println!("Delete student: {} - {}", student.id, student.name);
            }
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = match ids.as_slice() {
        [id] => library.delete_student(*id).map(|_| 1),
        _ => library.delete_students(&ids),
    }
    .context("Failed to delete students")?;

    output.success(&format!("Deleted {} student(s)", deleted));
    Ok(())
}
