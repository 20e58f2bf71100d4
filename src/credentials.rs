use std::fs;
use std::path::Path;

use crate::error::CredentialError;

/// Reads the billing API key. Surrounding whitespace is dropped.
pub fn load_key(path: &Path) -> Result<String, CredentialError> {
    let raw = fs::read_to_string(path).map_err(|source| CredentialError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty(path.to_path_buf()));
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn trims_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AIzaSyExample").unwrap();

        assert_eq!(load_key(file.path()).unwrap(), "AIzaSyExample");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_key(&dir.path().join("key.secret")).unwrap_err();

        assert!(matches!(err, CredentialError::Read { .. }));
    }

    #[test]
    fn blank_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  \n").unwrap();

        assert!(matches!(load_key(file.path()), Err(CredentialError::Empty(_))));
    }
}
