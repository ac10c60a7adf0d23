// src/profile/form.rs
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::utils::content_type_for;

/// A file attached to the profile form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid attachment path: {}", path.display()))?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::new(file_name, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

/// Ordered named fields of the profile form, text and files alike
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    fields: Vec<FormField>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            value: FormValue::Text(value.to_string()),
        });
        self
    }

    pub fn with_attachment(mut self, name: &str, attachment: Attachment) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            value: FormValue::File(attachment),
        });
        self
    }

    pub async fn attach_path(self, name: &str, path: &Path) -> Result<Self> {
        let attachment = Attachment::from_path(path).await?;
        Ok(self.with_attachment(name, attachment))
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the multipart payload, one part per field in order
    pub fn to_multipart(&self) -> Result<Form> {
        let mut form = Form::new();
        for field in &self.fields {
            form = match &field.value {
                FormValue::Text(value) => form.text(field.name.clone(), value.clone()),
                FormValue::File(attachment) => {
                    let part = Part::bytes(attachment.bytes.clone())
                        .file_name(attachment.file_name.clone())
                        .mime_str(&attachment.content_type)
                        .with_context(|| {
                            format!("Invalid content type for field {}", field.name)
                        })?;
                    form.part(field.name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}
