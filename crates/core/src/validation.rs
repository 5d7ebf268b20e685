//! Pre-submit validation of the upload selection.
//!
//! Everything here runs before any network call (error class (c)): an
//! invalid selection is rejected locally and no request is issued.

use crate::config::UploadRules;
use crate::error::CoreError;
use crate::types::UploadSelection;

/// Default lower bound on the copy count.
pub const DEFAULT_MIN_COPIES: u32 = 1;

/// Default upper bound on the copy count.
pub const DEFAULT_MAX_COPIES: u32 = 100;

/// Default per-file size ceiling (25 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;

/// Clamp a requested copy count into the configured `[min, max]` range.
pub fn clamp_copies(requested: u32, rules: &UploadRules) -> u32 {
    requested.clamp(rules.min_copies, rules.max_copies)
}

/// Validate a selection against the shop's upload rules.
///
/// Checks, in order: non-empty file set, extension allow-list, per-file
/// size ceiling. Copy count is not checked here — it is clamped, not
/// rejected (see [`clamp_copies`]).
pub fn validate_selection(
    selection: &UploadSelection,
    rules: &UploadRules,
) -> Result<(), CoreError> {
    if selection.files.is_empty() {
        return Err(CoreError::EmptySelection);
    }

    for file in &selection.files {
        let ext = file
            .extension()
            .ok_or_else(|| CoreError::UnsupportedFileType(file.name.clone()))?;
        if !rules.accepted_extensions.iter().any(|a| a == &ext) {
            return Err(CoreError::UnsupportedFileType(file.name.clone()));
        }
        if file.size > rules.max_file_bytes {
            return Err(CoreError::FileTooLarge {
                name: file.name.clone(),
                max_bytes: rules.max_file_bytes,
            });
        }
    }

    Ok(())
}
