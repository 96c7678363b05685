//! Per-file checks that run when files are dropped or picked.
//!
//! These mirror what a host dropzone does before handing files over: each file
//! is checked against the accepted types and the size limit, and a single drop
//! carrying more files than `max_files` is refused outright. Only the files
//! that survive reach [`UploadBatch::add_files`](crate::batch::UploadBatch::add_files),
//! which applies the count limit against the live batch.

use std::fmt;
use std::str::FromStr;

use crate::config::BatchConfig;
use crate::entry::FileBlob;
use crate::error::Rejection;

/// Cause code attached to a rejected file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectionCode {
    FileTooLarge,
    FileInvalidType,
    TooManyFiles,
    /// A code this crate does not recognise
    Other(String),
}

impl RejectionCode {
    pub fn as_str(&self) -> &str {
        match self {
            RejectionCode::FileTooLarge => "file-too-large",
            RejectionCode::FileInvalidType => "file-invalid-type",
            RejectionCode::TooManyFiles => "too-many-files",
            RejectionCode::Other(code) => code,
        }
    }

    /// Resolves the code into a [`Rejection`] using the limits in `config`.
    ///
    /// Unset limits are reported as zero.
    pub fn to_rejection(&self, config: &BatchConfig) -> Rejection {
        match self {
            RejectionCode::FileTooLarge => Rejection::FileTooLarge(config.max_size.unwrap_or(0)),
            RejectionCode::FileInvalidType => Rejection::InvalidFileType,
            RejectionCode::TooManyFiles => Rejection::TooManyFiles(config.max_files.unwrap_or(0)),
            RejectionCode::Other(_) => Rejection::UnsupportedFile,
        }
    }
}

impl FromStr for RejectionCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "file-too-large" => RejectionCode::FileTooLarge,
            "file-invalid-type" => RejectionCode::FileInvalidType,
            "too-many-files" => RejectionCode::TooManyFiles,
            other => RejectionCode::Other(other.to_string()),
        })
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file refused during a drop, with every reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRejection {
    pub file: FileBlob,
    pub causes: Vec<RejectionCode>,
}

/// Result of validating one drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropOutcome {
    pub accepted: Vec<FileBlob>,
    pub rejections: Vec<FileRejection>,
}

/// Splits dropped files into accepted files and rejections.
pub fn validate_drop(candidates: Vec<FileBlob>, config: &BatchConfig) -> DropOutcome {
    let mut outcome = DropOutcome::default();

    for file in candidates {
        let causes = check_file(&file, config);
        if causes.is_empty() {
            outcome.accepted.push(file);
        } else {
            outcome.rejections.push(FileRejection { file, causes });
        }
    }

    if let Some(max_files) = config.max_files {
        if outcome.accepted.len() > max_files {
            let refused = std::mem::take(&mut outcome.accepted);
            outcome
                .rejections
                .extend(refused.into_iter().map(|file| FileRejection {
                    file,
                    causes: vec![RejectionCode::TooManyFiles],
                }));
        }
    }

    outcome
}

/// Judges items while they are still being dragged.
///
/// Only what a host can see before the drop is checked: the item count
/// against `max_files` and each item's type. Sizes wait for the drop. An
/// empty list means the host exposed nothing, so validity is unknown.
pub fn drag_items_valid(items: &[FileBlob], config: &BatchConfig) -> Option<bool> {
    if items.is_empty() {
        return None;
    }
    if config.max_files.is_some_and(|max_files| items.len() > max_files) {
        return Some(false);
    }
    let types_ok = match &config.accepted_types {
        Some(patterns) => items.iter().all(|item| is_type_accepted(item, patterns)),
        None => true,
    };
    Some(types_ok)
}

/// Runs the type and size checks for a single file.
pub fn check_file(file: &FileBlob, config: &BatchConfig) -> Vec<RejectionCode> {
    let mut causes = Vec::new();

    if let Some(patterns) = &config.accepted_types {
        if !is_type_accepted(file, patterns) {
            causes.push(RejectionCode::FileInvalidType);
        }
    }

    if let Some(max_size) = config.max_size {
        if file.size > max_size {
            causes.push(RejectionCode::FileTooLarge);
        }
    }

    causes
}

/// Whether `file` matches any of the accept patterns.
///
/// Patterns are `.ext` suffixes, `type/*` wildcards or exact MIME types, all
/// compared case-insensitively. An empty list accepts nothing.
pub fn is_type_accepted(file: &FileBlob, patterns: &[String]) -> bool {
    let mime = file.mime_type.as_deref().map(str::to_ascii_lowercase);
    let extension = file.extension();

    patterns.iter().any(|pattern| {
        let pattern = pattern.trim().to_ascii_lowercase();
        if pattern.starts_with('.') {
            return extension.as_deref() == Some(pattern.as_str());
        }
        let Some(mime) = mime.as_deref() else {
            return false;
        };
        match pattern.strip_suffix("/*") {
            Some(major) => mime
                .split_once('/')
                .is_some_and(|(file_major, _)| file_major == major),
            None => mime == pattern,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, size: u64) -> FileBlob {
        FileBlob::new(name, size).with_mime_type("image/png")
    }

    #[test]
    fn test_code_round_trip_and_fallback() {
        for code in ["file-too-large", "file-invalid-type", "too-many-files"] {
            let parsed: RejectionCode = code.parse().unwrap();
            assert_eq!(parsed.as_str(), code);
        }
        let other: RejectionCode = "file-too-small".parse().unwrap();
        assert_eq!(other, RejectionCode::Other("file-too-small".to_string()));
    }

    #[test]
    fn test_code_to_rejection_uses_limits() {
        let config = BatchConfig::new().with_max_files(3).with_max_size(2048);
        assert_eq!(
            RejectionCode::FileTooLarge.to_rejection(&config),
            Rejection::FileTooLarge(2048)
        );
        assert_eq!(
            RejectionCode::TooManyFiles.to_rejection(&config),
            Rejection::TooManyFiles(3)
        );
        assert_eq!(
            RejectionCode::Other("x".into()).to_rejection(&config),
            Rejection::UnsupportedFile
        );
        assert_eq!(
            RejectionCode::FileTooLarge.to_rejection(&BatchConfig::default()),
            Rejection::FileTooLarge(0)
        );
    }

    #[test]
    fn test_no_constraints_accepts_everything() {
        let outcome = validate_drop(
            vec![FileBlob::new("a.bin", u64::MAX), FileBlob::new("b", 0)],
            &BatchConfig::default(),
        );
        assert_eq!(outcome.accepted.len(), 2);
        assert!(outcome.rejections.is_empty());
    }

    #[test]
    fn test_oversized_file_rejected() {
        let config = BatchConfig::new().with_max_size(1_048_576);
        let outcome = validate_drop(
            vec![FileBlob::new("small.txt", 500), FileBlob::new("big.bin", 2_000_000)],
            &config,
        );
        assert_eq!(outcome.accepted, vec![FileBlob::new("small.txt", 500)]);
        assert_eq!(outcome.rejections.len(), 1);
        assert_eq!(outcome.rejections[0].file.name, "big.bin");
        assert_eq!(outcome.rejections[0].causes, vec![RejectionCode::FileTooLarge]);
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let config = BatchConfig::new().with_max_size(1024);
        let outcome = validate_drop(vec![FileBlob::new("edge", 1024)], &config);
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn test_type_checked_before_size() {
        let config = BatchConfig::new()
            .with_max_size(10)
            .with_accepted_types(["image/*"]);
        let file = FileBlob::new("notes.txt", 100).with_mime_type("text/plain");
        assert_eq!(
            check_file(&file, &config),
            vec![RejectionCode::FileInvalidType, RejectionCode::FileTooLarge]
        );
    }

    #[test]
    fn test_drop_larger_than_max_files_rejected_wholesale() {
        let config = BatchConfig::new().with_max_files(2);
        let outcome = validate_drop(
            vec![png("a.png", 1), png("b.png", 1), png("c.png", 1)],
            &config,
        );
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejections.len(), 3);
        assert!(outcome
            .rejections
            .iter()
            .all(|r| r.causes == vec![RejectionCode::TooManyFiles]));
    }

    #[test]
    fn test_per_file_failures_do_not_count_towards_max_files() {
        let config = BatchConfig::new().with_max_files(2).with_max_size(10);
        let outcome = validate_drop(
            vec![png("a.png", 1), png("b.png", 1), png("huge.png", 100)],
            &config,
        );
        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.rejections.len(), 1);
        assert_eq!(outcome.rejections[0].causes, vec![RejectionCode::FileTooLarge]);
    }

    #[test]
    fn test_mime_wildcard() {
        let patterns = vec!["image/*".to_string()];
        assert!(is_type_accepted(&png("a.png", 1), &patterns));
        assert!(is_type_accepted(
            &FileBlob::new("a.jpg", 1).with_mime_type("IMAGE/JPEG"),
            &patterns
        ));
        assert!(!is_type_accepted(
            &FileBlob::new("a.mp4", 1).with_mime_type("video/mp4"),
            &patterns
        ));
        assert!(!is_type_accepted(&FileBlob::new("a.png", 1), &patterns));
    }

    #[test]
    fn test_exact_mime_and_extension() {
        let patterns = vec!["application/pdf".to_string(), ".CSV".to_string()];
        assert!(is_type_accepted(
            &FileBlob::new("doc", 1).with_mime_type("application/pdf"),
            &patterns
        ));
        assert!(is_type_accepted(&FileBlob::new("data.csv", 1), &patterns));
        assert!(!is_type_accepted(
            &FileBlob::new("data.tsv", 1).with_mime_type("text/tab-separated-values"),
            &patterns
        ));
    }

    #[test]
    fn test_empty_pattern_list_accepts_nothing() {
        assert!(!is_type_accepted(&png("a.png", 1), &[]));
    }

    #[test]
    fn test_drag_items_valid() {
        let config = BatchConfig::new()
            .with_max_files(2)
            .with_max_size(10)
            .with_accepted_types(["image/*"]);

        assert_eq!(drag_items_valid(&[], &config), None);
        // Size is not known to matter until the drop
        assert_eq!(drag_items_valid(&[png("big.png", 1000)], &config), Some(true));
        assert_eq!(
            drag_items_valid(&[png("a.png", 1), FileBlob::new("b.txt", 1)], &config),
            Some(false)
        );
        assert_eq!(
            drag_items_valid(&[png("a.png", 1), png("b.png", 1), png("c.png", 1)], &config),
            Some(false)
        );
        assert_eq!(
            drag_items_valid(&[FileBlob::new("b.txt", 1)], &BatchConfig::default()),
            Some(true)
        );
    }
}
