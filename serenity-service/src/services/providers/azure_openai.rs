//! Azure OpenAI chat completions with an Azure AI Search data source.
//!
//! Retrieval happens on the Azure side: the request names the search index
//! and the service grounds its answer in it before replying.

use super::{CompletionChoice, CompletionProvider, CompletionResponse, ProviderError};
use crate::config::{AzureOpenAiConfig, SearchConfig};
use crate::models::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Azure OpenAI provider bound to one chat deployment and one search index.
pub struct AzureOpenAiProvider {
    client: Client,
    openai: AzureOpenAiConfig,
    search: SearchConfig,
}

impl AzureOpenAiProvider {
    pub fn new(openai: AzureOpenAiConfig, search: SearchConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            openai,
            search,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.openai.endpoint.trim_end_matches('/'),
            self.openai.chat_deployment
        )
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            messages,
            data_sources: vec![DataSource {
                kind: "azure_search",
                parameters: SearchParameters {
                    endpoint: &self.search.endpoint,
                    index_name: &self.search.index_name,
                    authentication: SearchAuthentication {
                        kind: "api_key",
                        key: self.search.admin_key.expose_secret(),
                    },
                },
            }],
        }
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, ProviderError> {
        if self.openai.endpoint.is_empty() {
            return Err(ProviderError::NotConfigured(
                "AZURE_OPENAI_ENDPOINT is not set".to_string(),
            ));
        }
        if self.openai.chat_deployment.is_empty() {
            return Err(ProviderError::NotConfigured(
                "AZURE_OPENAI_CHAT_COMPLETIONS_DEPLOYMENT_NAME is not set".to_string(),
            ));
        }

        tracing::debug!(
            deployment = %self.openai.chat_deployment,
            index = %self.search.index_name,
            turns = messages.len(),
            "Sending request to Azure OpenAI"
        );

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.openai.api_version.as_str())])
            .header("api-key", self.openai.api_key.expose_secret())
            .json(&self.build_request(messages))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(CompletionResponse {
            choices: api_response
                .choices
                .into_iter()
                .map(|choice| CompletionChoice {
                    content: choice.message.and_then(|m| m.content),
                    finish_reason: choice.finish_reason,
                })
                .collect(),
        })
    }
}

// -----------------------------------------------------------------------------
// Azure OpenAI API Types
// -----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    data_sources: Vec<DataSource<'a>>,
}

#[derive(Debug, Serialize)]
struct DataSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: SearchParameters<'a>,
}

#[derive(Debug, Serialize)]
struct SearchParameters<'a> {
    endpoint: &'a str,
    index_name: &'a str,
    authentication: SearchAuthentication<'a>,
}

#[derive(Debug, Serialize)]
struct SearchAuthentication<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    key: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
