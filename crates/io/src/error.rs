use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum IoError {
    /// The file does not exist.
    NotFound(PathBuf),
    /// The OS refused access to the file.
    PermissionDenied(PathBuf),
    /// The file was read but is not a valid sheet.
    Corrupt { path: PathBuf, reason: String },
    /// Any other OS-level failure.
    Io { path: PathBuf, source: io::Error },
}

impl IoError {
    /// Classify an OS error for `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::PermissionDenied(path) => write!(f, "permission denied: {}", path.display()),
            Self::Corrupt { path, reason } => {
                write!(f, "{} is not a valid sheet: {reason}", path.display())
            }
            Self::Io { path, source } => write!(f, "IO error on {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::PermissionDenied(_) | Self::Corrupt { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_kinds() {
        let path = Path::new("sheet.json");
        let not_found = IoError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(not_found, IoError::NotFound(_)));

        let denied = IoError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, IoError::PermissionDenied(_)));

        let other = IoError::from_io(path, io::Error::from(io::ErrorKind::WriteZero));
        assert!(matches!(other, IoError::Io { .. }));
        assert!(std::error::Error::source(&other).is_some());
    }

    #[test]
    fn test_display() {
        let err = IoError::corrupt(Path::new("a.json"), "bad address 'A0'");
        assert_eq!(err.to_string(), "a.json is not a valid sheet: bad address 'A0'");
    }
}
