pub mod models;
pub mod ollama;

pub use models::{GenerateOptions, GenerateRequest, ModelInfo, ModelList};
pub use ollama::OllamaClient;
