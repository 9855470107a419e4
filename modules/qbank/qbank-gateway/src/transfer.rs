use std::path::{Path, PathBuf};

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_DISPOSITION;

use crate::error::GatewayError;

/// A file sent as a multipart form upload (bulk imports, QR codes).
#[derive(Debug, Clone)]
pub struct Upload {
    field: String,
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl Upload {
    /// A CSV file under the conventional `file` form field.
    #[must_use]
    pub fn csv(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new("file", file_name, "text/csv", bytes)
    }

    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an upload from disk, naming it after the file.
    ///
    /// # Errors
    /// Returns `GatewayError::Io` if the file cannot be read.
    pub async fn from_path(
        field: impl Into<String>,
        path: &Path,
        content_type: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(field, file_name, content_type, bytes))
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form, GatewayError> {
        let part = reqwest::multipart::Part::bytes(self.bytes.to_vec())
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| GatewayError::Build(format!("Invalid content type: {e}")))?;
        Ok(reqwest::multipart::Form::new().part(self.field, part))
    }
}

/// A binary response to be saved client-side (templates, exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Download {
    pub(crate) fn from_parts(headers: &HeaderMap, bytes: Bytes, default_name: &str) -> Self {
        let file_name = attachment_file_name(headers).unwrap_or_else(|| default_name.to_owned());
        Self { file_name, bytes }
    }

    /// Write the file into `dir` and return its path.
    ///
    /// # Errors
    /// Returns `GatewayError::Io` if the file cannot be written.
    pub async fn save_into(&self, dir: &Path) -> Result<PathBuf, GatewayError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// File name from `Content-Disposition: attachment; filename="..."`.
///
/// Path separators are stripped so a hostile header cannot escape the target
/// directory.
fn attachment_file_name(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let name = value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|raw| raw.trim_matches('"').to_owned())
    })?;
    let name = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .to_owned();
    (!name.is_empty() && name != "..").then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn disposition(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn file_name_from_header() {
        let headers = disposition("attachment; filename=\"questions-export.csv\"");
        let download = Download::from_parts(&headers, Bytes::from_static(b"a,b"), "fallback.csv");
        assert_eq!(download.file_name, "questions-export.csv");
    }

    #[test]
    fn file_name_falls_back_to_default() {
        let download = Download::from_parts(&HeaderMap::new(), Bytes::new(), "role-template.csv");
        assert_eq!(download.file_name, "role-template.csv");
    }

    #[test]
    fn directory_components_are_stripped() {
        let headers = disposition("attachment; filename=\"../../etc/passwd\"");
        assert_eq!(attachment_file_name(&headers).as_deref(), Some("passwd"));
    }

    #[tokio::test]
    async fn save_into_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            file_name: "user-template.csv".into(),
            bytes: Bytes::from_static(b"first_name,last_name\n"),
        };

        let path = download.save_into(dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("user-template.csv"));
        assert_eq!(std::fs::read(path).unwrap(), b"first_name,last_name\n");
    }
}
