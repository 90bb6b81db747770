//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory: called at startup.
//! Adding a new backend = new module + new match arm.

pub mod azure_openai;
pub mod dummy;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and the API key.
pub fn build(config: &LlmConfig, api_key: &str) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider::new())),
        "azure" | "azure-openai" => {
            let p = azure_openai::AzureOpenAiProvider::new(
                &config.endpoint,
                &config.api_version,
                config.deployment.clone(),
                config.timeout_seconds,
                api_key.to_string(),
            )?;
            Ok(LlmProvider::Azure(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}
