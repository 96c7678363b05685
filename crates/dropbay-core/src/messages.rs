//! User-facing messages for rejected files.

use crate::config::BatchConfig;
use crate::error::Rejection;
use crate::format::format_file_size;
use crate::validation::FileRejection;

/// Human-readable banner text for a rejection.
pub fn rejection_message(rejection: &Rejection) -> String {
    match rejection {
        Rejection::FileTooLarge(max_size) => format!(
            "The file is too large. Max size is {}.",
            format_file_size(Some(*max_size))
        ),
        Rejection::InvalidFileType => "Invalid file type.".to_string(),
        Rejection::TooManyFiles(max_files) => {
            format!("You can only add {} file(s).", max_files)
        }
        Rejection::UnsupportedFile => "The file is not supported.".to_string(),
    }
}

/// Banner text for the last drop's rejections, if there were any.
///
/// Only the first cause of the first rejected file is reported; the limits
/// quoted in the message come from `config`.
pub fn derive_error_message(
    last_rejections: &[FileRejection],
    config: &BatchConfig,
) -> Option<String> {
    let first = last_rejections.first()?;
    let rejection = match first.causes.first() {
        Some(code) => code.to_rejection(config),
        None => Rejection::UnsupportedFile,
    };
    Some(rejection_message(&rejection))
}
