use crate::config::{GenerationSettings, OllamaSettings};
use crate::error::{ProbeError, Result};
use crate::llm::models::{GenerateRequest, ModelList};
use base64::Engine;
use reqwest::Client;
use serde_json::Value;
use std::error::Error as _;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the Ollama generation endpoint
///
/// Issues one non-streaming `/api/generate` call per image. Nothing is
/// retried; every failure comes back as a [`ProbeError`].
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    generation: GenerationSettings,
}

impl OllamaClient {
    /// Create a client from the loaded configuration
    pub fn new(settings: &OllamaSettings, generation: &GenerationSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
            model: settings.model.clone(),
            timeout,
            generation: generation.clone(),
        })
    }

    /// Model name requests are sent with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Read and encode the image, and assemble the request body.
    pub fn build_generate_request(&self, prompt: &str, image_path: &Path) -> Result<GenerateRequest> {
        let bytes = std::fs::read(image_path).map_err(|e| {
            ProbeError::ImageError(format!("failed to read {}: {}", image_path.display(), e))
        })?;

        debug!("Encoding {} bytes from {}", bytes.len(), image_path.display());
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

        Ok(GenerateRequest::new(self.model.clone(), prompt, encoded, &self.generation))
    }

    /// Send the prompt and image, returning the model's `response` text.
    pub async fn generate(&self, prompt: &str, image_path: &Path) -> Result<String> {
        let body = self.build_generate_request(prompt, image_path)?;

        if body.stream {
            warn!("stream is enabled in config; the reply is still read as a single JSON object");
        }

        info!("Sending generation request to Ollama");
        debug!("Model: {}, Prompt length: {}", self.model, prompt.len());

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(ProbeError::NetworkError(format!(
                "Ollama API error: {}",
                response.status()
            )));
        }

        let text = response.text().await.map_err(|e| self.network_error(e))?;
        let response_body: Value = serde_json::from_str(&text)
            .map_err(|_| ProbeError::ResponseShapeError(text.clone()))?;

        response_body["response"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ProbeError::ResponseShapeError(response_body.to_string()))
    }

    /// Confirm the configured model is installed on the server.
    ///
    /// Matches the first listed model whose name contains the configured
    /// one and switches to that full name, so `llava` becomes e.g.
    /// `llava:latest`.
    pub async fn check_model_available(&mut self) -> Result<String> {
        debug!("Fetching available Ollama models");

        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(ProbeError::NetworkError(format!(
                "Failed to get models: {}",
                response.status()
            )));
        }

        let text = response.text().await.map_err(|e| self.network_error(e))?;
        let models: ModelList = serde_json::from_str(&text)
            .map_err(|_| ProbeError::ResponseShapeError(text.clone()))?;

        let found = models
            .find(&self.model)
            .ok_or_else(|| ProbeError::ModelNotAvailable(self.model.clone()))?;

        info!("Ollama model \"{}\" is available as \"{}\"", self.model, found.name);
        self.model = found.name.clone();

        Ok(self.model.clone())
    }

    /// Describe a transport failure, naming timeouts and refused connections.
    fn network_error(&self, e: reqwest::Error) -> ProbeError {
        let kind = if e.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else if e.is_connect() {
            format!("could not connect to {}", self.base_url)
        } else {
            "request failed".to_string()
        };

        let mut message = format!("{}: {}", kind, e);
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }

        ProbeError::NetworkError(message)
    }
}
