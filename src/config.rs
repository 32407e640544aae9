//! Configuration and prompt loading.
//!
//! `config.json` and `prompt.txt` live in one directory, by default the one
//! holding the executable. Optional keys are filled in by serde defaults at
//! load time, so the rest of the crate never deals with missing values.

use crate::error::{ProbeError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const PROMPT_FILE_NAME: &str = "prompt.txt";

/// Overrides the directory `config.json` and `prompt.txt` are read from.
pub const CONFIG_DIR_ENV: &str = "VISION_PROBE_CONFIG_DIR";

/// Top-level contents of `config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub ollama: OllamaSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the model server lives and which model to ask
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Ask `/api/tags` whether the model is installed before generating
    #[serde(default)]
    pub check_model: bool,
}

/// Sampling options forwarded to `/api/generate`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub stream: bool,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            stream: false,
            temperature: 0.3,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print the extracted JSON value after the raw reply
    pub print_raw_response: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            print_raw_response: true,
        }
    }
}

fn default_timeout() -> u64 {
    120
}

impl OllamaSettings {
    /// Server origin without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Defaults shipped in `settings/`, installed when the config directory lacks them
pub const DEFAULT_CONFIG: &str = include_str!("../settings/config.json");
pub const DEFAULT_PROMPT: &str = include_str!("../settings/prompt.txt");

/// Read and parse `config.json`.
pub fn load_json_config(path: &Path) -> Result<ProbeConfig> {
    debug!("Loading configuration from {}", path.display());

    let data = std::fs::read_to_string(path).map_err(|e| {
        ProbeError::ConfigError(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse_config(&data, &path.display().to_string())
}

fn parse_config(data: &str, origin: &str) -> Result<ProbeConfig> {
    serde_json::from_str(data).map_err(|e| {
        ProbeError::ConfigError(format!("failed to parse {}: {}", origin, e))
    })
}

/// Read the prompt file verbatim.
pub fn load_prompt(path: &Path) -> Result<String> {
    debug!("Loading prompt from {}", path.display());

    std::fs::read_to_string(path).map_err(|e| {
        ProbeError::ConfigError(format!("failed to read prompt {}: {}", path.display(), e))
    })
}

/// Load `config.json` and `prompt.txt` from `dir`.
///
/// A file missing from `dir` is copied there from the bundled defaults. If
/// the copy cannot be written the bundled text is used directly.
pub fn load_settings(dir: &Path) -> Result<(ProbeConfig, String)> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let config = if install_default(&config_path, DEFAULT_CONFIG) {
        load_json_config(&config_path)?
    } else {
        parse_config(DEFAULT_CONFIG, "bundled config.json")?
    };

    let prompt_path = dir.join(PROMPT_FILE_NAME);
    let prompt = if install_default(&prompt_path, DEFAULT_PROMPT) {
        load_prompt(&prompt_path)?
    } else {
        DEFAULT_PROMPT.to_string()
    };

    Ok((config, prompt))
}

/// Returns true when `path` exists afterwards.
fn install_default(path: &Path, bundled: &str) -> bool {
    if path.exists() {
        return true;
    }

    warn!("{} not found, installing bundled default", path.display());
    match std::fs::write(path, bundled) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not write {} ({}), using bundled default in memory", path.display(), e);
            false
        }
    }
}

/// Directory holding `config.json` and `prompt.txt`.
///
/// `VISION_PROBE_CONFIG_DIR` wins; otherwise the executable's directory.
pub fn default_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
        Err(e) => {
            warn!("Could not determine executable location ({}), using current directory", e);
            PathBuf::from(".")
        }
    }
}
