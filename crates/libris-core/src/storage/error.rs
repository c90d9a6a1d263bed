//! Storage error handling
//!
//! Covers the database itself and the files around it: the data directory
//! and backup files. File errors carry the path and, where the user can act
//! on them, a recovery suggestion.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::Collection;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied on '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of disk space while writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Any other I/O failure on a library file
    #[error("Cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The new file was written but could not replace the old one
    #[error("Could not move '{from}' into place at '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot encode backup: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A write targeted a record that does not exist
    #[error("No {} record with id {id}", .collection.singular())]
    RecordNotFound { collection: Collection, id: i64 },

    /// A grouped write referred to a record it never created
    #[error("Write group has no created record at position {index}")]
    UnresolvedReference { index: usize },
}

impl StorageError {
    /// Classify an I/O failure on `path`
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound { path },
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_out_of_space(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::Io {
                path,
                source: error,
            },
        }
    }

    /// Whether the database rejected a write because of a constraint
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }

    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. } => Some(
                "Make sure the data directory is writable, or point elsewhere with \
                 `libris config set data_dir <path>`.",
            ),
            StorageError::AtomicWriteFailed { .. } => {
                Some("The previous file is untouched. Remove the leftover .tmp file and retry.")
            }
            _ => None,
        }
    }
}

#[cfg(unix)]
fn is_out_of_space(error: &io::Error) -> bool {
    // ENOSPC has the same value on Linux, macOS and the BSDs
    error.raw_os_error() == Some(28)
}

#[cfg(windows)]
fn is_out_of_space(error: &io::Error) -> bool {
    // ERROR_HANDLE_DISK_FULL, ERROR_DISK_FULL
    matches!(error.raw_os_error(), Some(39) | Some(112))
}

#[cfg(not(any(unix, windows)))]
fn is_out_of_space(_error: &io::Error) -> bool {
    false
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
            PathBuf::from("/srv/library/library.db"),
        );
        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().is_some());

        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            PathBuf::from("backup.json"),
        );
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(err.recovery_suggestion().is_none());

        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"),
            PathBuf::from("backup.json"),
        );
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_out_of_space_detected_from_os_code() {
        let err = StorageError::from_io(
            io::Error::from_raw_os_error(28),
            PathBuf::from("/full/library_backup_2024-01-13.json"),
        );
        assert!(matches!(err, StorageError::DiskFull { .. }));
        assert_eq!(
            err.recovery_suggestion(),
            Some("Free up disk space and try again.")
        );
    }

    #[test]
    fn test_record_not_found_display() {
        let err = StorageError::RecordNotFound {
            collection: Collection::Loans,
            id: 42,
        };

        assert_eq!(err.to_string(), "No loan record with id 42");
        assert!(!err.is_constraint_violation());
    }
}
