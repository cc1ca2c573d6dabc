//! VFS Error Types

use std::io;
use thiserror::Error;

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// Error type for VFS operations
#[derive(Debug, Error)]
pub enum VfsError {
    /// File or directory not found
    #[error("Path not found: {path}")]
    NotFound { path: String },

    /// A file operation was attempted on a directory
    #[error("Is a directory: {path}")]
    IsADirectory { path: String },

    /// A directory operation was attempted on a file
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// Path is rooted or climbs above the store root
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Host IO failure
    #[error("IO error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Find/lookup pattern did not compile
    #[error("invalid regexp pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Search expression built from the phrase and extension did not compile
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidSearchPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Search ignore expression did not compile
    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl VfsError {
    /// Map a host IO error, keeping `NotFound` distinct from other failures.
    pub(crate) fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => VfsError::NotFound {
                path: path.to_string(),
            },
            _ => VfsError::Io {
                path: path.to_string(),
                source: err,
            },
        }
    }

    /// True if the error means the entry does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound { .. })
    }

    /// True for any of the three pattern compilation failures.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(
            self,
            VfsError::InvalidPattern { .. }
                | VfsError::InvalidSearchPattern { .. }
                | VfsError::InvalidIgnorePattern { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = VfsError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Path not found: a.txt");
    }

    #[test]
    fn test_other_io_errors_stay_io() {
        let err = VfsError::from_io("a.txt", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, VfsError::Io { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_pattern_errors_are_distinct() {
        let source = regex::Regex::new("(").unwrap_err();
        let search = VfsError::InvalidSearchPattern {
            pattern: "(.*".to_string(),
            source: source.clone(),
        };
        let ignore = VfsError::InvalidIgnorePattern {
            pattern: ".*(.*".to_string(),
            source,
        };
        assert!(search.is_invalid_pattern());
        assert!(ignore.is_invalid_pattern());
        assert!(search.to_string().starts_with("invalid search pattern"));
        assert!(ignore.to_string().starts_with("invalid ignore pattern"));
    }
}
