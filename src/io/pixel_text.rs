use std::path::Path;

use crate::error::{Error, Result};

/// Read the single line of a pixel text file, without its line ending.
///
/// Blank lines are ignored; a file with more than one non-blank line is
/// rejected with `Error::ExtraLines`. A file with none yields an empty line.
pub fn read_pixel_line(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::UnreadableFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let first = lines.next().unwrap_or_default();
    let extra = lines.count();
    if extra > 0 {
        return Err(Error::ExtraLines {
            path: path.to_path_buf(),
            count: extra + 1,
        });
    }
    Ok(first.trim_end_matches('\r').to_string())
}

/// Write `line` followed by a newline.
pub fn write_pixel_line(path: &Path, line: &str) -> Result<()> {
    std::fs::write(path, format!("{}\n", line)).map_err(|e| Error::write_failure(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_with_crlf_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "0,1,0,1\r\n\r\n").unwrap();
        assert_eq!(read_pixel_line(&path).unwrap(), "0,1,0,1");
    }

    #[test]
    fn several_value_lines_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "0,0,0,0\n1,1,1,1\n").unwrap();
        assert!(matches!(
            read_pixel_line(&path),
            Err(Error::ExtraLines { count: 2, .. })
        ));
    }

    #[test]
    fn empty_file_reads_as_empty_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "").unwrap();
        assert_eq!(read_pixel_line(&path).unwrap(), "");
    }

    #[test]
    fn written_line_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_pixel_line(&path, "0,0.5").unwrap();
        assert_eq!(read_pixel_line(&path).unwrap(), "0,0.5");
    }
}
