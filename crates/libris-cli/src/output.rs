//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::NaiveDate;
use serde::Serialize;

use libris_core::{
    Book, FineNotice, LibraryStats, LoanView, Notification, NotificationKind, ReturnReceipt,
    Standing, Student, UserProfile,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", book.id);
                println!("Title:  {}", book.title);
                println!("Author: {}", book.author);
                println!("Status: {}", book.status);
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.id),
        }
    }

    /// Print a list of books
    pub fn print_books(&self, books: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!(
                        "{:>4} | {:<35} | {:<22} | {}",
                        book.id,
                        truncate(&book.title, 35),
                        truncate(&book.author, 22),
                        book.status
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    pub fn print_student(&self, student: &Student) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", student.id);
                println!("Name:   {}", student.name);
                println!("Course: {}", student.course);
                println!("Email:  {}", student.email);
                println!("Phone:  {}", student.phone);
            }
            OutputFormat::Json => print_json(student),
            OutputFormat::Quiet => println!("{}", student.id),
        }
    }

    pub fn print_students(&self, students: &[Student]) {
        match self.format {
            OutputFormat::Human => {
                if students.is_empty() {
                    println!("No students found.");
                    return;
                }
                for student in students {
                    println!(
                        "{:>4} | {:<22} | {:<10} | {:<24} | {}",
                        student.id,
                        truncate(&student.name, 22),
                        truncate(&student.course, 10),
                        truncate(&student.email, 24),
                        student.phone
                    );
                }
                println!("\n{} student(s)", students.len());
            }
            OutputFormat::Json => print_json(students),
            OutputFormat::Quiet => {
                for student in students {
                    println!("{}", student.id);
                }
            }
        }
    }

    /// Print active loans with their standing
    pub fn print_loans(&self, loans: &[LoanView]) {
        match self.format {
            OutputFormat::Human => {
                if loans.is_empty() {
                    println!("No books are currently issued.");
                    return;
                }
                for view in loans {
                    let fine = if view.fine > 0 {
                        format!("₹{}", view.fine)
                    } else {
                        "-".to_string()
                    };
                    println!(
                        "{:>4} | {:<28} | {:<18} | due {} | {:<8} | {}",
                        view.loan.id,
                        truncate(&view.loan.book_name, 28),
                        truncate(&view.loan.student_name, 18),
                        format_date(view.loan.due_date),
                        view.standing.label(),
                        fine
                    );
                }
                let overdue = loans
                    .iter()
                    .filter(|v| v.standing == Standing::Overdue)
                    .count();
                println!("\n{} loan(s), {} overdue", loans.len(), overdue);
            }
            OutputFormat::Json => print_json(loans),
            OutputFormat::Quiet => {
                for view in loans {
                    println!("{}", view.loan.id);
                }
            }
        }
    }

    pub fn print_stats(&self, stats: &LibraryStats, arrivals: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                println!("Library Overview");
                println!("================");
                println!();
                println!("Books:     {} total", stats.total_books);
                println!("           {} available", stats.available_books);
                println!("           {} issued", stats.issued_books);
                println!("Students:  {}", stats.students);
                println!(
                    "Loans:     {} active, {} overdue, {} due soon",
                    stats.active_loans, stats.overdue_loans, stats.due_soon_loans
                );

                if !arrivals.is_empty() {
                    println!();
                    println!("── New Arrivals ──");
                    for book in arrivals {
                        println!("{} by {}", book.title, book.author);
                    }
                }
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "stats": stats,
                "newArrivals": arrivals,
            })),
            OutputFormat::Quiet => println!("{}", stats.overdue_loans),
        }
    }

    pub fn print_profile(&self, profile: &UserProfile) {
        match self.format {
            OutputFormat::Human => {
                println!("{} ({})", profile.name, profile.role);
                println!("Email: {}", profile.email);
                println!("Phone: {}", profile.phone);
                if let Some(ref department) = profile.department {
                    println!("Department: {}", department);
                }
                if let Some(ref joined) = profile.join_date {
                    println!("Joined: {}", joined);
                }
                if let Some(ref bio) = profile.bio {
                    println!();
                    println!("{}", bio);
                }
            }
            OutputFormat::Json => print_json(profile),
            OutputFormat::Quiet => println!("{}", profile.email),
        }
    }

    pub fn print_fine_notice(&self, notice: &FineNotice) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "\"{}\" (loan {}) is {} day(s) overdue.",
                    notice.book_name, notice.loan_id, notice.overdue_days
                );
                println!("Borrower: {}", notice.student_name);
                println!("Due:      {}", format_date(notice.due_date));
                println!("Fine:     ₹{}", notice.amount);
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "status": "payment_required",
                "fine": notice,
            })),
            OutputFormat::Quiet => println!("{}", notice.amount),
        }
    }

    pub fn print_receipt(&self, receipt: &ReturnReceipt) {
        match self.format {
            OutputFormat::Human => {
                if receipt.fine_paid > 0 {
                    println!("✓ Payment of ₹{} recorded successfully.", receipt.fine_paid);
                }
                println!(
                    "✓ \"{}\" returned by {}",
                    receipt.loan.book_name, receipt.loan.student_name
                );
            }
            OutputFormat::Json => print_json(receipt),
            OutputFormat::Quiet => {}
        }
    }

    pub fn print_notifications(&self, notes: &[Notification]) {
        match self.format {
            OutputFormat::Human => {
                if notes.is_empty() {
                    println!("No loans need a reminder.");
                    return;
                }
                for note in notes {
                    let marker = match note.kind {
                        NotificationKind::Overdue => "!",
                        NotificationKind::Reminder => "·",
                    };
                    println!("{} [loan {}] {}", marker, note.loan_id, note.message);
                }
            }
            OutputFormat::Json => print_json(notes),
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.loan_id);
                }
            }
        }
    }

    /// Print any serializable value in JSON mode, or a message otherwise
    pub fn print_value<T: Serialize + ?Sized>(&self, value: &T, message: &str) {
        match self.format {
            OutputFormat::Json => print_json(value),
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
