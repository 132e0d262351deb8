use allerscan_core::domain::{
    common::CoreError,
    scan::{entities::EncodedImage, value_objects::ScanImageInput},
};
use axum::extract::Multipart;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Multipart body accepted by the scan endpoints. Send either field.
#[derive(Debug, ToSchema)]
pub struct ScanImageForm {
    /// Image file; its part content type must be `image/*`.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
    /// `data:<mimetype>;base64,<payload>`
    pub photo_data_uri: Option<String>,
}

pub async fn read_scan_image(mut multipart: Multipart) -> Result<ScanImageInput, ApiError> {
    let mut image: Option<EncodedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                image = Some(EncodedImage::new(mime_type, data).map_err(CoreError::from)?);
            }
            "photo_data_uri" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read photo_data_uri: {}", e))
                })?;

                image = Some(EncodedImage::from_data_uri(&value).map_err(CoreError::from)?);
            }
            _ => {}
        }
    }

    Ok(ScanImageInput { image })
}

/// Leaves room for base64 inflation of data URIs.
pub fn scan_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.saturating_mul(2).saturating_add(64 * 1024)
}
