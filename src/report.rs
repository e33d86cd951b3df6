//! User-facing messages for operation results

use crate::domain::{ClearState, FileOutcome, FileStatus, OperationResult};
use std::fmt::Display;
use std::io::{self, Write};

/// Which stream a message belongs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Message for one file. Successes name the canonical path, failures the path as given.
pub fn status_line(status: &FileStatus) -> (Stream, String) {
    let shown = status
        .resolved
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| status.path.clone());

    match &status.outcome {
        FileOutcome::Added => (
            Stream::Stdout,
            format!("File '{}' added successfully", shown),
        ),
        FileOutcome::TouchFailed(reason) => (
            Stream::Stderr,
            format!("Could not touch '{}' ({})", shown, reason),
        ),
        FileOutcome::NotFound => (
            Stream::Stderr,
            format!("Error '{}' does not exist!", status.path),
        ),
        FileOutcome::ResolutionFailed(_) => (
            Stream::Stderr,
            format!("Error getting '{}' path!", status.path),
        ),
        FileOutcome::RegistryWriteFailed(reason) => (
            Stream::Stderr,
            format!("Could not register '{}': {}", shown, reason),
        ),
    }
}

/// Writes one line per file. A touch failure also reports the registration that preceded it.
pub fn report_include<W: Write, E: Write>(
    result: &OperationResult,
    quiet: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    if quiet {
        return Ok(());
    }

    for status in &result.per_file {
        if let FileOutcome::TouchFailed(_) = status.outcome {
            let added = FileStatus {
                outcome: FileOutcome::Added,
                ..status.clone()
            };
            emit(status_line(&added), out, err)?;
        }
        emit(status_line(status), out, err)?;
    }
    Ok(())
}

pub fn report_clear<W: Write, E: Write>(
    result: &OperationResult,
    quiet: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    match &result.clear_state {
        // A store failure is fatal and always reported
        Some(ClearState::Failed(reason)) => {
            report_fatal(&format!("Could not clear recent files: {}", reason), err)
        }
        _ if quiet => Ok(()),
        Some(ClearState::Done(removed)) => writeln!(
            out,
            "Recent files cleared ({} entries removed)",
            removed
        ),
        Some(ClearState::Aborted) => writeln!(out, "Recent files were not cleared"),
        _ => Ok(()),
    }
}

/// Fatal errors are never silenced
pub fn report_fatal<E: Write>(error: &dyn Display, err: &mut E) -> io::Result<()> {
    writeln!(err, "There was an unexpected error:")?;
    writeln!(err, "\t{}", error)?;
    writeln!(err)
}

fn emit<W: Write, E: Write>(
    (stream, line): (Stream, String),
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    match stream {
        Stream::Stdout => writeln!(out, "{}", line),
        Stream::Stderr => writeln!(err, "{}", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExitStatus;
    use std::path::PathBuf;

    fn status(path: &str, resolved: Option<&str>, outcome: FileOutcome) -> FileStatus {
        FileStatus {
            path: path.to_string(),
            resolved: resolved.map(PathBuf::from),
            outcome,
        }
    }

    fn include_result(per_file: Vec<FileStatus>) -> OperationResult {
        let attempted = per_file.len();
        let succeeded = per_file.iter().filter(|s| s.outcome.is_registered()).count();
        OperationResult {
            attempted,
            succeeded,
            exit_status: ExitStatus::for_include(attempted, succeeded),
            per_file,
            clear_state: None,
        }
    }

    fn clear_result(state: ClearState) -> OperationResult {
        OperationResult {
            attempted: 0,
            succeeded: 0,
            exit_status: ExitStatus::for_clear(&state),
            per_file: Vec::new(),
            clear_state: Some(state),
        }
    }

    #[test]
    fn test_status_lines() {
        let added = status("a.txt", Some("/home/u/a.txt"), FileOutcome::Added);
        assert_eq!(
            status_line(&added),
            (Stream::Stdout, "File '/home/u/a.txt' added successfully".to_string())
        );

        let missing = status("nope", None, FileOutcome::NotFound);
        assert_eq!(
            status_line(&missing),
            (Stream::Stderr, "Error 'nope' does not exist!".to_string())
        );

        let unresolved = status("link", None, FileOutcome::ResolutionFailed("loop".into()));
        assert_eq!(
            status_line(&unresolved),
            (Stream::Stderr, "Error getting 'link' path!".to_string())
        );

        let untouched = status(
            "a.txt",
            Some("/home/u/a.txt"),
            FileOutcome::TouchFailed("denied".into()),
        );
        assert_eq!(
            status_line(&untouched),
            (Stream::Stderr, "Could not touch '/home/u/a.txt' (denied)".to_string())
        );
    }

    #[test]
    fn test_report_include_splits_streams() {
        let result = include_result(vec![
            status("a", Some("/x/a"), FileOutcome::Added),
            status("b", None, FileOutcome::NotFound),
            status("c", Some("/x/c"), FileOutcome::TouchFailed("denied".into())),
        ]);
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        report_include(&result, false, &mut out, &mut err).unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert_eq!(
            out,
            "File '/x/a' added successfully\nFile '/x/c' added successfully\n"
        );
        assert_eq!(
            err,
            "Error 'b' does not exist!\nCould not touch '/x/c' (denied)\n"
        );
    }

    #[test]
    fn test_report_include_quiet() {
        let result = include_result(vec![status("b", None, FileOutcome::NotFound)]);
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        report_include(&result, true, &mut out, &mut err).unwrap();

        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_clear() {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        report_clear(&clear_result(ClearState::Done(5)), false, &mut out, &mut err).unwrap();
        report_clear(&clear_result(ClearState::Aborted), false, &mut out, &mut err).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Recent files cleared (5 entries removed)\nRecent files were not cleared\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_report_clear_failure_ignores_quiet() {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        report_clear(
            &clear_result(ClearState::Failed("read-only".into())),
            true,
            &mut out,
            &mut err,
        )
        .unwrap();

        assert!(out.is_empty());
        assert!(String::from_utf8(err).unwrap().contains("read-only"));
    }

    #[test]
    fn test_report_fatal() {
        let mut err: Vec<u8> = Vec::new();
        report_fatal(&"No files specified", &mut err).unwrap();
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "There was an unexpected error:\n\tNo files specified\n\n"
        );
    }
}
