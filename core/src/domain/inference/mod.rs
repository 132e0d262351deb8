pub mod ports;

pub use ports::LLMClient;
