pub mod encoded_image;
pub mod scan_result;
pub mod scan_state;

pub use encoded_image::EncodedImage;
pub use scan_result::{ScanOutcome, ScanResult};
pub use scan_state::{ScanMode, ScanState, ScanStateMachine};
