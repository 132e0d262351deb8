pub mod entities;
pub mod ports;
pub mod services;
pub mod tracker;
pub mod value_objects;

pub use entities::{EncodedImage, ScanMode, ScanOutcome, ScanResult, ScanState};
pub use ports::ScanService;
pub use tracker::{ScanTicket, ScanTracker};
pub use value_objects::ScanImageInput;
