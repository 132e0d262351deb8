pub mod ports;

pub use ports::TextExtractor;
