//! The single pass from command-line arguments to printed result.

use crate::config::load_settings;
use crate::error::{ProbeError, Result};
use crate::extract::extract_json;
use crate::llm::OllamaClient;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// How a run ended when nothing failed
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No image argument; usage was printed
    Usage,
    /// The model answered and a JSON object was recovered
    Completed { raw: String, extracted: Value },
}

/// Run one probe. `args` includes the program name at index 0.
///
/// Output meant for the user goes to `out`; errors are returned for the
/// caller to report.
pub async fn run<W: Write>(args: &[String], config_dir: &Path, out: &mut W) -> Result<Outcome> {
    let Some(image_arg) = args.get(1) else {
        let program = args.first().map(String::as_str).unwrap_or("vision-probe");
        writeln!(out, "Usage: {} <image_path>", program)?;
        return Ok(Outcome::Usage);
    };

    let image_path = Path::new(image_arg);
    if !image_path.exists() {
        return Err(ProbeError::ImageError(format!(
            "image file does not exist: {}",
            image_path.display()
        )));
    }

    let (config, prompt) = load_settings(config_dir)?;

    let mut client = OllamaClient::new(&config.ollama, &config.generation)?;
    if config.ollama.check_model {
        client.check_model_available().await?;
    }

    let file_name = image_path.file_name().unwrap_or(image_path.as_os_str()).to_string_lossy();
    writeln!(out, "Sending image '{}' to Ollama...\n", file_name)?;

    let raw = client.generate(&prompt, image_path).await?;
    writeln!(out, "{}", raw)?;

    let extracted = extract_json(&raw)?;
    info!("Extracted JSON object from model response");

    if config.output.print_raw_response {
        writeln!(out, "Response from model:\n")?;
        writeln!(out, "{}", serde_json::to_string(&extracted)?)?;
    }

    Ok(Outcome::Completed { raw, extracted })
}
