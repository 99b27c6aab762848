use thiserror::Error;

/// Unified error type for bumptag operations
#[derive(Error, Debug)]
pub enum BumptagError {
    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Aborted by user")]
    Aborted,

    #[error("Commit failed: `{command}` exited with status {status}")]
    Commit { command: String, status: i32 },

    #[error("Tag creation failed: `{command}` exited with status {status}")]
    Tag { command: String, status: i32 },

    #[error("Push failed: `{command}` exited with status {status}")]
    Push { command: String, status: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bumptag
pub type Result<T> = std::result::Result<T, BumptagError>;

impl BumptagError {
    /// Create a metadata error with context
    pub fn metadata(msg: impl Into<String>) -> Self {
        BumptagError::Metadata(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumptagError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumptagError::Config(msg.into())
    }

    /// The exit status of the underlying git command, if this error wraps one.
    ///
    /// Used by the binary to propagate the subprocess exit code unchanged.
    pub fn subprocess_status(&self) -> Option<i32> {
        match self {
            BumptagError::Commit { status, .. }
            | BumptagError::Tag { status, .. }
            | BumptagError::Push { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BumptagError::metadata("marker line not found");
        assert_eq!(err.to_string(), "Metadata error: marker line not found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BumptagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(BumptagError::version("test")
            .to_string()
            .contains("Version"));
        assert!(BumptagError::config("test")
            .to_string()
            .contains("Configuration"));
    }

    #[test]
    fn test_subprocess_errors_carry_command_and_status() {
        let err = BumptagError::Tag {
            command: "git tag -a v1.0.0 -m 'version 1.0.0'".to_string(),
            status: 128,
        };
        let msg = err.to_string();
        assert!(msg.contains("git tag -a v1.0.0"));
        assert!(msg.contains("128"));
        assert_eq!(err.subprocess_status(), Some(128));
    }

    #[test]
    fn test_subprocess_status_only_for_git_failures() {
        assert_eq!(BumptagError::Aborted.subprocess_status(), None);
        assert_eq!(BumptagError::metadata("x").subprocess_status(), None);
        let push = BumptagError::Push {
            command: "git push origin v1.0.0".to_string(),
            status: 1,
        };
        assert_eq!(push.subprocess_status(), Some(1));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BumptagError::metadata("x"), "Metadata error"),
            (BumptagError::version("x"), "Version parsing error"),
            (BumptagError::config("x"), "Configuration error"),
            (BumptagError::Aborted, "Aborted by user"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
