//! Multipart form reading for post and comment submissions.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::attachment::DEFAULT_CONTENT_TYPE;
use crate::service::Upload;
use crate::web::error::ApiError;

/// Name of the multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Text fields and the optional image of a multipart submission.
#[derive(Debug, Default)]
pub struct MultipartFields {
    text: HashMap<String, String>,
    image: Option<Upload>,
}

impl MultipartFields {
    /// Read every field of the request into memory.
    ///
    /// An image part without a filename and without bytes (an untouched file
    /// input) is treated as absent.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error(e, "Invalid multipart data"))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == IMAGE_FIELD {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.is_empty());
                // Browsers send the generic type for anything they don't
                // recognise; leave those to filename inference
                let content_type = field
                    .content_type()
                    .filter(|ct| *ct != DEFAULT_CONTENT_TYPE)
                    .map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| read_error(e, "Failed to read image"))?;

                if filename.is_some() || !data.is_empty() {
                    fields.image = Some(Upload {
                        data: data.to_vec(),
                        content_type,
                        filename,
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| read_error(e, format!("Invalid value for {}", name)))?;
                fields.text.insert(name, value);
            }
        }

        Ok(fields)
    }

    /// Value of a text field, if it was sent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Value of a text field, or an empty string.
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Take the uploaded image out of the form.
    pub fn take_image(&mut self) -> Option<Upload> {
        self.image.take()
    }
}

/// Map a multipart read failure to an API error.
///
/// A body cut off by the request size limit is an oversized upload and is
/// rejected like one; anything else is malformed input.
fn read_error(err: MultipartError, message: impl Into<String>) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Multipart body exceeds the size limit: {}", err);
        return ApiError::unprocessable("Upload exceeds the size limit");
    }
    tracing::warn!("Failed to read multipart data: {}", err);
    ApiError::bad_request(message)
}
