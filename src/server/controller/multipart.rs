//! Buffers multipart bodies into text fields and files.

use axum::extract::Multipart;

use crate::{
    model::metadata::Metadata,
    server::{error::AppError, model::{payment::PaymentForm, upload::UploadedFile}},
};

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    /// Reads every part; parts with a file name become files.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if !file_name.is_empty() {
                        form.files.push((
                            name,
                            UploadedFile {
                                file_name,
                                bytes: bytes.to_vec(),
                            },
                        ));
                    }
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.fields.push((name, value));
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
    }

    /// Collects `<prefix>[<key>]` fields into metadata.
    pub fn map(&self, prefix: &str) -> Metadata {
        let mut metadata = Metadata::default();

        for (field, value) in &self.fields {
            let key = field
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('['))
                .and_then(|rest| rest.strip_suffix(']'));
            if let Some(key) = key.filter(|k| !k.is_empty()) {
                metadata.insert(key, value.clone());
            }
        }

        metadata
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(index).1)
    }

    pub fn into_payment_form(mut self) -> PaymentForm {
        PaymentForm {
            participant_id: self.text("participant_id"),
            uploaded_at: self.text("uploaded_at"),
            is_verified: self.text("is_verified"),
            metadata: self.map("metadata"),
            file: self.take_file("file_path"),
        }
    }
}
