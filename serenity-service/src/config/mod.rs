use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Azure OpenAI REST API version the chat endpoint is called with.
pub const DEFAULT_API_VERSION: &str = "2024-06-01";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Immutable settings snapshot, built once at startup and handed to the gateways.
///
/// Nothing here is validated at load time: a missing variable loads as an
/// empty string and only fails when the gateway that needs it is called.
#[derive(Debug, Clone)]
pub struct SerenityConfig {
    pub common: core_config::Config,
    pub openai: AzureOpenAiConfig,
    pub search: SearchConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: Secret<String>,
    /// Chat completions deployment (e.g., gpt-4o)
    pub chat_deployment: String,
    pub api_version: String,
    /// Embedding model the search index was vectorized with
    pub embedding_model: String,
    pub embedding_dimensions: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub admin_key: Secret<String>,
    pub index_name: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub connect_timeout: Duration,
}

impl SerenityConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Ok(Self::from_lookup(common, |key| env::var(key).ok()))
    }

    /// Build the snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        let embedding_dimensions = lookup("EMBEDDING_VECTOR_DIMENSIONS").and_then(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|e| {
                    tracing::warn!(value = %raw, error = %e, "Ignoring invalid EMBEDDING_VECTOR_DIMENSIONS");
                })
                .ok()
        });

        let connect_timeout_secs = lookup("DATABASE_CONNECT_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        let api_version = lookup("AZURE_OPENAI_API_VERSION")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        SerenityConfig {
            common,
            openai: AzureOpenAiConfig {
                endpoint: get("AZURE_OPENAI_ENDPOINT"),
                api_key: Secret::new(get("AZURE_OPENAI_API_KEY")),
                chat_deployment: get("AZURE_OPENAI_CHAT_COMPLETIONS_DEPLOYMENT_NAME"),
                api_version,
                embedding_model: get("AZURE_OPENAI_EMBEDDING_MODEL"),
                embedding_dimensions,
            },
            search: SearchConfig {
                endpoint: get("AZURE_SEARCH_SERVICE_ENDPOINT"),
                admin_key: Secret::new(get("AZURE_SEARCH_SERVICE_ADMIN_KEY")),
                index_name: get("SEARCH_INDEX_NAME"),
            },
            database: DatabaseConfig {
                url: Secret::new(get("DATABASE_URL")),
                connect_timeout: Duration::from_secs(connect_timeout_secs),
            },
        }
    }
}
