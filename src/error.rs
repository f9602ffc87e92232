/// Error types for the geobin library
use std::fmt;
use std::io;

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Main error type for database operations
#[derive(Debug)]
pub enum DatabaseError {
    /// I/O errors from the byte source (short reads, closed handles, OS errors)
    Io(io::Error),

    /// Header errors detected while loading metadata
    Format(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::Io(e) => write!(f, "I/O error: {}", e),
            DatabaseError::Format(msg) => write!(f, "Invalid database format: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatabaseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatabaseError {
    fn from(err: io::Error) -> Self {
        DatabaseError::Io(err)
    }
}
