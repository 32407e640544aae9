//! Send one image and a fixed prompt to a local Ollama vision model and
//! recover the JSON object it answers with.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;

pub use error::{ExtractionError, ProbeError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::app::{run, Outcome};
    pub use crate::config::{load_json_config, load_prompt, ProbeConfig};
    pub use crate::error::{ExtractionError, ProbeError, Result};
    pub use crate::extract::extract_json;
    pub use crate::llm::{GenerateRequest, OllamaClient};
}
