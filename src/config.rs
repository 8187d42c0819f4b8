//! Configuration helpers for menu-scout

use std::env;

/// Supported provider shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    LMStudio,
    Ollama,
    LlamaCpp,
    VLLM,
}

impl Provider {
    /// Get the default base URL for this provider
    pub fn default_url(&self) -> &'static str {
        match self {
            Provider::LMStudio => "http://localhost:1234/v1",
            Provider::Ollama => "http://localhost:11434/v1",
            Provider::LlamaCpp => "http://localhost:8080/v1",
            Provider::VLLM => "http://localhost:8000/v1",
        }
    }

    /// A vision-capable model commonly served by this provider, used as the
    /// default for the image workflows when nothing else is configured.
    pub fn default_vision_model(&self) -> &'static str {
        match self {
            Provider::LMStudio => "llava-v1.6-34b",
            Provider::Ollama => "gemma3:27b",
            Provider::LlamaCpp => "llava",
            Provider::VLLM => "llava-hf/llava-1.5-7b-hf",
        }
    }

    /// Parse a provider from a string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lmstudio" | "lm-studio" | "lm_studio" => Some(Provider::LMStudio),
            "ollama" => Some(Provider::Ollama),
            "llamacpp" | "llama-cpp" | "llama_cpp" | "llama.cpp" => Some(Provider::LlamaCpp),
            "vllm" => Some(Provider::VLLM),
            _ => None,
        }
    }
}

/// Get the base URL from environment variable or provider default
///
/// Priority:
/// 1. MENU_SCOUT_BASE_URL environment variable
/// 2. Provider default URL (if provider is Some)
/// 3. fallback parameter
///
/// # Examples
///
/// ```rust,no_run
/// use menu_scout::{get_base_url, Provider};
///
/// // Read from environment
/// let url = get_base_url(None, None);
///
/// // Use provider default
/// let url = get_base_url(Some(Provider::Ollama), None);
///
/// // With fallback
/// let url = get_base_url(None, Some("http://192.168.1.23:11434/v1"));
/// ```
pub fn get_base_url(provider: Option<Provider>, fallback: Option<&str>) -> String {
    // Try environment variable first
    if let Ok(url) = env::var("MENU_SCOUT_BASE_URL") {
        return url;
    }

    // Try provider default
    if let Some(p) = provider {
        return p.default_url().to_string();
    }

    // Use fallback or default to Ollama
    fallback
        .unwrap_or(Provider::Ollama.default_url())
        .to_string()
}

/// Get the model name from environment variable or fallback
///
/// Priority:
/// 1. MENU_SCOUT_MODEL environment variable (if prefer_env is true)
/// 2. fallback parameter
///
/// # Examples
///
/// ```rust,no_run
/// use menu_scout::get_model;
///
/// // Read from environment
/// let model = get_model(None, true);
///
/// // Use fallback
/// let model = get_model(Some("gemma3:27b"), true);
///
/// // Force fallback (ignore environment)
/// let model = get_model(Some("llava"), false);
/// ```
pub fn get_model(fallback: Option<&str>, prefer_env: bool) -> Option<String> {
    // Try environment variable first if preferred
    if prefer_env {
        if let Ok(model) = env::var("MENU_SCOUT_MODEL") {
            return Some(model);
        }
    }

    // Use fallback
    fallback.map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_default_urls() {
        assert_eq!(Provider::LMStudio.default_url(), "http://localhost:1234/v1");
        assert_eq!(Provider::Ollama.default_url(), "http://localhost:11434/v1");
        assert_eq!(Provider::LlamaCpp.default_url(), "http://localhost:8080/v1");
        assert_eq!(Provider::VLLM.default_url(), "http://localhost:8000/v1");
    }

    #[test]
    fn test_provider_default_vision_models() {
        assert_eq!(Provider::Ollama.default_vision_model(), "gemma3:27b");
        assert_eq!(Provider::LlamaCpp.default_vision_model(), "llava");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("lmstudio"), Some(Provider::LMStudio));
        assert_eq!(Provider::from_str("LM-Studio"), Some(Provider::LMStudio));
        assert_eq!(Provider::from_str("ollama"), Some(Provider::Ollama));
        assert_eq!(Provider::from_str("llamacpp"), Some(Provider::LlamaCpp));
        assert_eq!(Provider::from_str("llama.cpp"), Some(Provider::LlamaCpp));
        assert_eq!(Provider::from_str("vllm"), Some(Provider::VLLM));
        assert_eq!(Provider::from_str("unknown"), None);
    }

    #[test]
    fn test_get_base_url_with_provider() {
        // Clear environment variable
        unsafe {
            env::remove_var("MENU_SCOUT_BASE_URL");
        }

        let url = get_base_url(Some(Provider::Ollama), None);
        assert_eq!(url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_get_base_url_with_fallback() {
        // Clear environment variable
        unsafe {
            env::remove_var("MENU_SCOUT_BASE_URL");
        }

        let url = get_base_url(None, Some("http://192.168.1.23:11434/v1"));
        assert_eq!(url, "http://192.168.1.23:11434/v1");
    }
}
