use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{Error, Result};
use crate::services::file_storage::UploadedFile;

/// A fully buffered multipart body: text fields and file parts by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let data = field.bytes().await.map_err(|e| {
                        tracing::error!("Failed to read upload bytes: {}", e);
                        Error::BadRequest("Failed to read file upload".into())
                    })?;
                    if !data.is_empty() {
                        form.files.insert(name, UploadedFile { filename, data });
                    }
                }
                None => {
                    let value = field.text().await?;
                    form.texts.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| Error::BadRequest(format!("{} is required", name)))
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    pub fn required_file(&mut self, name: &str) -> Result<UploadedFile> {
        self.take_file(name)
            .ok_or_else(|| Error::BadRequest(format!("A non-empty `{}` file is required", name)))
    }
}
