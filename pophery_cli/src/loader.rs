//! Program source loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Lines starting with this are dropped
pub const COMMENT_MARKER: char = '#';

/// Source loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },
}

/// Join the non-comment lines of `source` with no separator
pub fn strip_comments(source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|line| line.strip_suffix('\n').unwrap_or(line))
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .collect()
}

/// Read a UTF-8 program file and strip its comments
pub fn load_program(path: &Path) -> Result<String, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(strip_comments(&source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_comments() {
        let source = "# greeting\n(^?)Hello(?$)\n# pointer\n(^!)O(!$)\n";
        assert_eq!(strip_comments(source), "(^?)Hello(?$)(^!)O(!$)");
    }

    #[test]
    fn test_strip_comments_keeps_inline_hash() {
        assert_eq!(strip_comments("a#b\n #c\nd"), "a#b #cd");
    }

    #[test]
    fn test_strip_comments_empty() {
        assert_eq!(strip_comments(""), "");
        assert_eq!(strip_comments("#only\n"), "");
    }

    #[test]
    fn test_load_program() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# comment\n(^?)ü(?$)\n(^!)O(!$)\n").unwrap();
        file.flush().unwrap();

        let program = load_program(file.path()).unwrap();
        assert_eq!(program, "(^?)ü(?$)(^!)O(!$)");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pophery");
        let err = load_program(&missing).unwrap_err();
        assert!(err.to_string().contains("absent.pophery"));
    }
}
