use crate::domain::scan::entities::EncodedImage;

#[derive(Debug, Clone, Default)]
pub struct ScanImageInput {
    /// `None` when the caller did not select an image.
    pub image: Option<EncodedImage>,
}

impl ScanImageInput {
    pub fn new(image: EncodedImage) -> Self {
        Self { image: Some(image) }
    }
}
