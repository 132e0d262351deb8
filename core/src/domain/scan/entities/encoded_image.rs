use std::{fmt, sync::LazyLock};

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::domain::common::PreconditionError;

static DATA_URI: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+);base64,(.*)$").ok()
});

/// An image payload with an explicit MIME type.
///
/// Construction guarantees a non-empty payload and an `image/*` MIME type.
/// The size cap depends on configuration and is checked with
/// [`EncodedImage::ensure_within`].
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    data: Bytes,
}

impl EncodedImage {
    pub fn new(
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Result<Self, PreconditionError> {
        let mime_type = mime_type.into().trim().to_ascii_lowercase();
        let data = data.into();

        if data.is_empty() {
            return Err(PreconditionError::EmptyImage);
        }
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(PreconditionError::UnsupportedMimeType(mime_type));
        }

        Ok(Self { mime_type, data })
    }

    /// Parses `data:<mimetype>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, PreconditionError> {
        let captures = DATA_URI
            .as_ref()
            .and_then(|pattern| pattern.captures(uri.trim()))
            .ok_or_else(|| {
                PreconditionError::InvalidDataUri(
                    "expected data:<mimetype>;base64,<payload>".to_string(),
                )
            })?;

        let mime_type = &captures[1];
        let payload: String = captures[2].split_whitespace().collect();
        let data = general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| PreconditionError::InvalidDataUri(format!("invalid base64 payload: {e}")))?;

        Self::new(mime_type, data)
    }

    pub fn ensure_within(&self, max_bytes: usize) -> Result<(), PreconditionError> {
        if self.data.len() > max_bytes {
            return Err(PreconditionError::ImageTooLarge {
                size: self.data.len(),
                max: max_bytes,
            });
        }
        Ok(())
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.data))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}
