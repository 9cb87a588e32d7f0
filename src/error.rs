use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for embedhdr operations
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Asset path does not exist or is not a regular file
    #[error("Asset not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Asset exists but could not be opened, read or decoded as UTF-8
    #[error("Cannot read asset {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two assets derive the same declaration name (strict mode)
    #[error("Duplicate declaration name {name}: '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    /// Derived name is not a valid C identifier fragment (strict mode)
    #[error("Asset '{file}' derives invalid identifier name {name}")]
    InvalidName { file: String, name: String },

    /// Generated header could not be written to the output file
    #[error("Cannot write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error when writing the generated document
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmbedError {
    /// True for the missing/unreadable asset family of errors
    #[must_use]
    pub const fn is_file_access(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::FileAccess { .. })
    }
}

pub type Result<T> = std::result::Result<T, EmbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmbedError::FileNotFound {
            path: PathBuf::from("web/index.html"),
        };
        assert_eq!(format!("{err}"), "Asset not found: web/index.html");

        let err = EmbedError::FileAccess {
            path: PathBuf::from("pico.css"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        assert_eq!(
            format!("{err}"),
            "Cannot read asset pico.css: stream did not contain valid UTF-8"
        );

        let err = EmbedError::DuplicateName {
            name: "A_B_C".to_string(),
            first: "a.b.c".to_string(),
            second: "a_b.c".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Duplicate declaration name A_B_C: 'a.b.c' and 'a_b.c'"
        );

        let err = EmbedError::InvalidName {
            file: "my-app.js".to_string(),
            name: "MY-APP_JS".to_string(),
        };
        assert!(format!("{err}").contains("MY-APP_JS"));

        let err = EmbedError::OutputWrite {
            path: PathBuf::from("out/embed.h"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            format!("{err}"),
            "Cannot write output out/embed.h: No such file or directory"
        );
        assert!(!err.is_file_access());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let err: EmbedError = io_err.into();
        assert!(matches!(err, EmbedError::Io(_)));
        assert!(!err.is_file_access());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: EmbedError = json_err.into();
        assert!(matches!(err, EmbedError::Json(_)));
    }

    #[test]
    fn test_is_file_access() {
        let err = EmbedError::FileNotFound {
            path: PathBuf::from("missing.js"),
        };
        assert!(err.is_file_access());

        let err = EmbedError::FileAccess {
            path: PathBuf::from("locked.css"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_file_access());
    }
}
