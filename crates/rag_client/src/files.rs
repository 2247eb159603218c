use std::path::Path;

use bytes::Bytes;

use crate::ClientError;

/// A document selected for upload: name, content type, and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileBlob {
    /// Content type is inferred from the file name's extension.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: content_type_for(&file_name).to_string(),
            file_name,
            bytes: bytes.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::Validation(format!("{} is not a file", path.display())))?;
        let bytes = std::fs::read(path).map_err(|err| {
            ClientError::Validation(format!("cannot read {}: {err}", path.display()))
        })?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
