//! Helpers for saving downloaded files.

use std::path::{Path, PathBuf};

use printdesk_core::types::Token;

/// A file retrieved from the server, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DownloadedFile {
    /// Write the file into `dir` under its (sanitized) filename.
    ///
    /// Returns the full path written.
    pub async fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let target = dir.join(sanitize_filename(&self.filename));
        tokio::fs::write(&target, &self.bytes).await?;
        tracing::debug!(path = %target.display(), bytes = self.bytes.len(), "Saved download");
        Ok(target)
    }
}

/// Extract the filename from a `Content-Disposition` header value.
///
/// Handles both the quoted form (`attachment; filename="jobs.zip"`) and the
/// bare form (`attachment; filename=jobs.zip`). Returns `None` when no
/// `filename=` parameter is present or it is empty.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let name = rest.split(';').next().unwrap_or(rest).trim();
    let name = name.trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Generated filename for a batch archive when the server does not send
/// `Content-Disposition`.
pub fn fallback_batch_filename(token: &Token) -> String {
    format!("prints_{token}.zip")
}

/// Strip path separators so a server-supplied filename cannot escape the
/// target directory.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(['.', ' ']).to_string();
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename_is_extracted() {
        let header = r#"attachment; filename="prints_T-9.zip""#;
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("prints_T-9.zip")
        );
    }

    #[test]
    fn bare_filename_is_extracted() {
        let header = "attachment; filename=report.pdf";
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("report.pdf")
        );
    }

    #[test]
    fn filename_before_other_parameters() {
        let header = "attachment; filename=\"a.zip\"; size=123";
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("a.zip")
        );
    }

    #[test]
    fn missing_filename_returns_none() {
        assert!(filename_from_content_disposition("attachment").is_none());
        assert!(filename_from_content_disposition("attachment; filename=\"\"").is_none());
    }

    #[test]
    fn fallback_contains_the_token() {
        let name = fallback_batch_filename(&"T-42".into());
        assert_eq!(name, "prints_T-42.zip");
    }

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("a\\b.pdf"), "a_b.pdf");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename("..."), "download");
    }

    #[tokio::test]
    async fn save_to_writes_the_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedFile {
            filename: "out.zip".into(),
            bytes: vec![1, 2, 3],
        };

        let path = file.save_to(dir.path()).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), vec![1, 2, 3]);
    }
}
