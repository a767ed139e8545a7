use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Unable to write {location}: {reason}")]
    WriteError { location: String, reason: String },
}

/// Writes the rendered template to `path`, or to standard output when no
/// path is given.
pub fn write(path: Option<&Path>, contents: &str) -> Result<(), Error> {
    match path {
        Some(path) => write_file(path, contents),
        None => write_stdout(contents),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    let file_contents = format!("{}\n", contents);
    fs::write(path, file_contents).map_err(|error| Error::WriteError {
        location: path.display().to_string(),
        reason: error.to_string(),
    })?;

    tracing::info!(path = %path.display(), "wrote template");
    return Ok(());
}

fn write_stdout(contents: &str) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "{}", contents)
        .and_then(|_| handle.flush())
        .map_err(|error| Error::WriteError {
            location: String::from("standard output"),
            reason: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::write;
    use super::Error;
    use tempfile::tempdir;

    #[test]
    fn writes_the_file_with_trailing_newline() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("template.json");

        write(Some(file_path.as_path()), "{}").unwrap();

        assert_eq!("{}\n", fs::read_to_string(&file_path).unwrap());
    }

    #[test]
    fn missing_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing").join("template.json");

        let result = write(Some(file_path.as_path()), "{}");
        match result.err().unwrap() {
            Error::WriteError { location, .. } => {
                assert_eq!(file_path.display().to_string(), location)
            }
        }
    }
}
