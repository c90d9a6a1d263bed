//! Issue, return and reminder command handlers

use anyhow::{Context, Result};

use libris_core::{Library, ReturnOutcome};

use crate::output::Output;
use crate::prompt::confirm;

/// Issue a book to a student
pub fn issue(library: &mut Library, student_id: i64, book_id: i64, output: &Output) -> Result<()> {
    let loan = library
        .issue_book(student_id, book_id)
        .context("Failed to issue book")?;

    output.print_value(
        &loan,
        &format!(
            "Issued \"{}\" to {} (loan {}), due back {}",
            loan.book_name, loan.student_name, loan.id, loan.due_date
        ),
    );
    Ok(())
}

/// Return a book, collecting any fine first
///
/// With a fine owed the return only goes ahead when `--collect-payment`
/// was given or the librarian confirms at the prompt.
pub fn return_book(
    library: &mut Library,
    loan_id: i64,
    collect_payment: bool,
    output: &Output,
) -> Result<()> {
    let notice = match library.return_book(loan_id).context("Failed to return book")? {
        ReturnOutcome::Returned(receipt) => {
            output.print_receipt(&receipt);
            return Ok(());
        }
        ReturnOutcome::PaymentRequired(notice) => notice,
    };

    output.print_fine_notice(&notice);

    let paid = collect_payment
        || (output.should_prompt()
            && confirm(&format!("Collect ₹{} and complete the return?", notice.amount))?);
    if !paid {
        output.message("Return not completed. Re-run with --collect-payment once the fine is paid.");
        return Ok(());
    }

    let receipt = library
        .confirm_payment(&notice)
        .context("Failed to complete return")?;
    output.print_receipt(&receipt);
    Ok(())
}

/// List active loans
pub fn loans(library: &Library, output: &Output) -> Result<()> {
    let loans = library.loans()?;
    output.print_loans(&loans);
    Ok(())
}

/// Compose reminders for one loan or for every loan that needs one
pub fn notify(library: &Library, loan_id: Option<i64>, output: &Output) -> Result<()> {
    let notes = match loan_id {
        Some(id) => {
            let note = library.notify(id)?;
            if note.is_none() {
                output.message(&format!("Loan {} is not overdue or due soon.", id));
                return Ok(());
            }
            note.into_iter().collect()
        }
        None => library.notify_all()?,
    };

    output.print_notifications(&notes);
    Ok(())
}
