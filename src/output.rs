use std::io::{self, Write};
use std::path::Path;

use crate::error::PrdError;
use crate::model::prd::Prd;

/// Pretty JSON with two-space indentation; non-ASCII text is kept as-is.
pub fn to_json(prd: &Prd) -> serde_json::Result<String> {
    serde_json::to_string_pretty(prd)
}

/// Print the PRD followed by a newline. Errors such as a closed pipe are
/// returned rather than panicking.
pub fn print_prd<W: Write>(out: &mut W, prd: &Prd) -> io::Result<()> {
    let json = to_json(prd)?;
    writeln!(out, "{json}")?;
    out.flush()
}

/// Write the PRD to `path` in a single write, creating parent directories.
pub fn write_prd(path: &Path, prd: &Prd) -> Result<(), PrdError> {
    let write_err = |source: io::Error| PrdError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut json = to_json(prd).map_err(|e| write_err(e.into()))?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, json).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prd::UserStory;

    fn sample() -> Prd {
        Prd {
            project: "Café".into(),
            branch_name: "feature/café".into(),
            description: "JIRA tickets for project Café".into(),
            user_stories: vec![UserStory {
                id: "CAFE-1".into(),
                title: "Menü".into(),
                description: "Implement Menü".into(),
                acceptance_criteria: vec![
                    "Implement Menü".into(),
                    "Code passes all tests".into(),
                    "Documentation updated".into(),
                ],
                priority: 1,
                passes: true,
                notes: String::new(),
            }],
        }
    }

    #[test]
    fn writes_two_space_indented_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");

        write_prd(&path, &sample()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\n  \"project\": \"Café\",\n  \"branchName\""));
        assert!(contents.contains("\n  \"userStories\": [\n    {\n      \"id\": \"CAFE-1\""));
        assert!(contents.contains("Menü"));
        assert!(!contents.contains("\\u"));
        assert!(contents.ends_with("}\n"));

        let parsed: Prd = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("prd.json");

        write_prd(&path, &sample()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn prints_pretty_json_line() {
        let mut buf = Vec::new();

        print_prd(&mut buf, &sample()).unwrap();

        let printed = String::from_utf8(buf).unwrap();
        assert!(printed.starts_with("{\n  \"project\": \"Café\""));
        assert!(printed.ends_with("}\n"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn closed_stdout_is_an_error_not_a_panic() {
        let err = print_prd(&mut ClosedPipe, &sample()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();

        let err = write_prd(dir.path(), &sample()).unwrap_err();

        assert!(matches!(err, PrdError::Write { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
