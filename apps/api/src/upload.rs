//! Resume upload intake: reads multipart forms and enforces the accepted file formats.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Upper bound on an uploaded resume (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// A validated resume file, ready to forward to the backend.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Upload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Multipart body split into the resume file and its text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Upload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Takes the uploaded file, failing when the form carried none.
    pub fn require_file(&mut self) -> Result<Upload, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::Validation("file is required".to_string()))
    }

    /// A text field, trimmed; blank values count as absent.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Checks extension, emptiness and size of an uploaded resume.
pub fn validate_upload(
    filename: &str,
    content_type: Option<String>,
    bytes: Bytes,
) -> Result<Upload, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported file type for '{filename}'. Supported formats: PDF, DOCX"
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation(format!("'{filename}' is empty")));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "'{filename}' is {:.2} MB; the limit is 5 MB",
            bytes.len() as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(Upload {
        filename: filename.to_string(),
        content_type,
        bytes,
    })
}

/// Drains a multipart body. The part named `file` is validated as a resume;
/// every other named part is read as text.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            form.file = Some(validate_upload(&filename, content_type, bytes)?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
            form.fields.insert(name, value);
        }
    }

    tracing::debug!(
        has_file = form.file.is_some(),
        fields = form.fields.len(),
        "Read upload form"
    );

    Ok(form)
}
