//! OpenAI Responses API gateway implementation

use super::protocol::{
    CreateConversationRequest, CreateConversationResponse, Reasoning, ResponsesRequest,
    ResponsesResponse, WireInputItem,
};
use async_trait::async_trait;
use delegate_application::ports::llm_gateway::{GatewayError, LlmGateway, TurnRequest};
use delegate_domain::{ConversationHandle, LlmResponse, truncate_str};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest response body quoted in an error
const ERROR_BODY_LIMIT: usize = 2000;

/// LLM gateway over the OpenAI Conversations and Responses endpoints.
///
/// One request per call, no retries: any transport failure ends the run.
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGateway {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("OpenAiGateway initialized ({})", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST a JSON body and return the response text of a 2xx reply.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, GatewayError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: truncate_str(&text, ERROR_BODY_LIMIT).to_string(),
            });
        }
        Ok(text)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() || e.is_request() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::Other(e.to_string())
    }
}

fn malformed(err: impl std::fmt::Display, body: &str) -> GatewayError {
    GatewayError::MalformedResponse(format!(
        "{}: {}",
        err,
        truncate_str(body, ERROR_BODY_LIMIT)
    ))
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_conversation(
        &self,
        system_prompt: &str,
    ) -> Result<ConversationHandle, GatewayError> {
        let body = self
            .post(
                "conversations",
                &CreateConversationRequest::with_developer_prompt(system_prompt),
            )
            .await?;

        let parsed: CreateConversationResponse =
            serde_json::from_str(&body).map_err(|e| malformed(e, &body))?;
        match parsed.id {
            Some(id) if !id.trim().is_empty() => Ok(ConversationHandle::new(id)),
            _ => Err(malformed("unexpected response", &body)),
        }
    }

    async fn respond(&self, turn: TurnRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let request = ResponsesRequest {
            model: turn.model,
            conversation: turn.conversation.as_str(),
            tools: turn.tools,
            tool_choice: "auto",
            parallel_tool_calls: false,
            input: turn.input.iter().map(WireInputItem::from).collect(),
            reasoning: turn.reasoning_effort.map(|effort| Reasoning { effort }),
        };

        let body = self.post("responses", &request).await?;
        let parsed: ResponsesResponse =
            serde_json::from_str(&body).map_err(|e| malformed(e, &body))?;
        Ok(parsed.into_llm_response())
    }
}
