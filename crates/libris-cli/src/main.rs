//! Libris CLI
//!
//! Command-line interface for Libris - library circulation and fines.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use libris_core::{
    Config, ImportError, Library, LibraryError, Role, StatusFilter, StorageError,
};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Libris - Library circulation and fine management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Act as this role instead of the configured one
    #[arg(long, global = true, value_parser = parse_role)]
    role: Option<Role>,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the book catalog
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Manage registered students
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },
    /// Issue a book to a student
    Issue {
        /// Student ID
        student_id: i64,
        /// Book ID
        book_id: i64,
    },
    /// Return a book
    Return {
        /// Loan ID
        loan_id: i64,
        /// Record payment of any fine without asking
        #[arg(long)]
        collect_payment: bool,
    },
    /// List active loans with due status and fines
    Loans,
    /// Send overdue alerts and due-soon reminders
    Notify {
        /// Only this loan (default: every loan that needs one)
        loan_id: Option<i64>,
    },
    /// Show dashboard statistics
    Stats,
    /// Export everything to a JSON backup
    Export {
        /// Output file (default: library_backup_<date>.json)
        path: Option<PathBuf>,
    },
    /// Append the contents of a JSON backup
    Import {
        /// Backup file to read
        path: PathBuf,
    },
    /// Show the profile of the current role
    Profile,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a book to the catalog
    #[command(alias = "create")]
    Add {
        /// Title
        title: String,
        /// Author
        author: String,
    },
    /// List or search books
    #[command(alias = "ls")]
    List {
        /// Match title or author (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Only books with this status
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },
    /// Change a book's title or author
    Edit {
        /// Book ID
        id: i64,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New author
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Delete one or more books
    #[command(alias = "rm")]
    Delete {
        /// Book IDs
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum StudentCommands {
    /// Register a student
    #[command(alias = "create")]
    Add {
        /// Full name
        name: String,
        /// Course of study
        course: String,
        /// Email (default: derived from the name)
        #[arg(short, long)]
        email: Option<String>,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// List registered students
    #[command(alias = "ls")]
    List,
    /// Delete one or more students
    #[command(alias = "rm")]
    Delete {
        /// Student IDs
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, seed_demo_data, role)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    All,
    Available,
    Issued,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Available => StatusFilter::Available,
            StatusArg::Issued => StatusFilter::Issued,
        }
    }
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output);
    if let Err(ref e) = result {
        if let Some(hint) = recovery_suggestion(e) {
            eprintln!("Hint: {}", hint);
        }
    }
    result
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands work without opening the database
    if let Commands::Config { command } = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut library =
        Library::open_with_config(&config).context("Failed to open library database")?;
    if let Some(role) = cli.role {
        library.set_role(role);
    }

    match cli.command {
        Commands::Book { command } => handle_book_command(command, &mut library, output),
        Commands::Student { command } => handle_student_command(command, &mut library, output),
        Commands::Issue {
            student_id,
            book_id,
        } => commands::circulation::issue(&mut library, student_id, book_id, output),
        Commands::Return {
            loan_id,
            collect_payment,
        } => commands::circulation::return_book(&mut library, loan_id, collect_payment, output),
        Commands::Loans => commands::circulation::loans(&library, output),
        Commands::Notify { loan_id } => commands::circulation::notify(&library, loan_id, output),
        Commands::Stats => commands::dashboard::stats(&library, output),
        Commands::Profile => commands::dashboard::profile(&library, output),
        Commands::Export { path } => commands::backup::export(&library, path, output),
        Commands::Import { path } => commands::backup::import(&mut library, &path, output),
        Commands::Config { .. } => Ok(()), // Handled above
    }
}

fn handle_book_command(command: BookCommands, library: &mut Library, output: &Output) -> Result<()> {
    match command {
        BookCommands::Add { title, author } => commands::book::add(library, title, author, output),
        BookCommands::List { search, status } => {
            commands::book::list(library, search, status.into(), output)
        }
        BookCommands::Edit { id, title, author } => {
            commands::book::edit(library, id, title, author, output)
        }
        BookCommands::Delete { ids, yes } => commands::book::delete(library, ids, yes, output),
    }
}

fn handle_student_command(
    command: StudentCommands,
    library: &mut Library,
    output: &Output,
) -> Result<()> {
    match command {
        StudentCommands::Add {
            name,
            course,
            email,
            phone,
        } => commands::student::add(library, name, course, email, phone, output),
        StudentCommands::List => commands::student::list(library, output),
        StudentCommands::Delete { ids, yes } => {
            commands::student::delete(library, ids, yes, output)
        }
    }
}

/// Find a storage failure anywhere in the error chain and ask it for advice
fn recovery_suggestion(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        if let Some(storage) = cause.downcast_ref::<StorageError>() {
            return storage.recovery_suggestion();
        }
        if let Some(import) = cause.downcast_ref::<ImportError>() {
            return import.recovery_suggestion();
        }
        match cause.downcast_ref::<LibraryError>() {
            Some(LibraryError::Storage(storage)) => storage.recovery_suggestion(),
            Some(LibraryError::Import(import)) => import.recovery_suggestion(),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["libris", "--json", "--role", "user", "stats"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.role, Some(Role::User));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_parse_return_with_payment() {
        let cli = Cli::try_parse_from(["libris", "return", "4", "--collect-payment"]).unwrap();
        match cli.command {
            Commands::Return {
                loan_id,
                collect_payment,
            } => {
                assert_eq!(loan_id, 4);
                assert!(collect_payment);
            }
            _ => panic!("expected return command"),
        }
    }

    #[test]
    fn test_parse_book_list_filters() {
        let cli = Cli::try_parse_from([
            "libris", "book", "ls", "--search", "code", "--status", "available",
        ])
        .unwrap();
        match cli.command {
            Commands::Book {
                command: BookCommands::List { search, status },
            } => {
                assert_eq!(search.as_deref(), Some("code"));
                assert_eq!(StatusFilter::from(status), StatusFilter::Available);
            }
            _ => panic!("expected book list"),
        }
    }

    #[test]
    fn test_rejects_unknown_role_and_missing_ids() {
        assert!(Cli::try_parse_from(["libris", "--role", "guest", "stats"]).is_err());
        assert!(Cli::try_parse_from(["libris", "book", "delete"]).is_err());
    }

    #[test]
    fn test_recovery_suggestion_found_through_context() {
        let storage = StorageError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/data/library.db"),
        );
        let error = anyhow::Error::new(LibraryError::Storage(storage)).context("Failed to open");
        assert!(recovery_suggestion(&error).is_some());

        let error = anyhow::Error::new(LibraryError::BookNotFound(3));
        assert!(recovery_suggestion(&error).is_none());
    }

    #[test]
    fn test_import_hint_names_missing_borrower() {
        let import = ImportError::UnresolvedStudent {
            index: 0,
            reference: "\"Rohan Verma\"".to_string(),
        };
        let error = anyhow::Error::new(LibraryError::Import(import))
            .context("Failed to import \"library_backup_2024-01-13.json\"");

        let hint = recovery_suggestion(&error).unwrap();
        assert!(hint.contains("'students'"));
        assert!(hint.contains("remove the loan"));
    }
}
