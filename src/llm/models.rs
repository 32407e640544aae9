use crate::config::GenerationSettings;
use serde::{Deserialize, Serialize};

/// Sampling options for `/api/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
    pub top_p: f64,
}

/// Body of a single `/api/generate` call
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Base64-encoded images; always exactly one here
    pub images: Vec<String>,
    pub stream: bool,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Create a request for one encoded image
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        encoded_image: String,
        generation: &GenerationSettings,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            images: vec![encoded_image],
            stream: generation.stream,
            options: GenerateOptions {
                temperature: generation.temperature,
                top_p: generation.top_p,
            },
        }
    }
}

/// One entry of the `/api/tags` model listing
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

/// Response of `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelList {
    /// First listed model whose name contains `model`
    pub fn find(&self, model: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.name.contains(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_serialization() {
        let request = GenerateRequest::new(
            "llava",
            "Describe this image.",
            "aGVsbG8=".to_string(),
            &GenerationSettings::default(),
        );

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "model": "llava",
                "prompt": "Describe this image.",
                "images": ["aGVsbG8="],
                "stream": false,
                "options": {"temperature": 0.3, "top_p": 0.9}
            })
        );
    }

    #[test]
    fn test_generate_request_uses_generation_settings() {
        let generation = GenerationSettings {
            stream: true,
            temperature: 0.1,
            top_p: 0.5,
        };

        let request = GenerateRequest::new("llava", "p", String::new(), &generation);

        assert!(request.stream);
        assert_eq!(request.options, GenerateOptions { temperature: 0.1, top_p: 0.5 });
    }

    #[test]
    fn test_model_list_find_substring() {
        let list: ModelList = serde_json::from_str(
            r#"{"models":[{"name":"mxbai-embed-large:latest","size":1},{"name":"llava:latest"},{"name":"llava:13b"}]}"#,
        )
        .unwrap();

        assert_eq!(list.find("llava").unwrap().name, "llava:latest");
        assert!(list.find("gemma3").is_none());
    }

    #[test]
    fn test_model_list_missing_models_key() {
        let list: ModelList = serde_json::from_str("{}").unwrap();
        assert!(list.models.is_empty());
    }
}
