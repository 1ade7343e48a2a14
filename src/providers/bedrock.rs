use serde::{Deserialize, Serialize};
use log::{debug, trace, error, info};
use serde_json::Value;
use std::collections::HashMap;

use crate::config::GatewayConfig;
use crate::error::Error;
use crate::providers::sigv4::SigV4Signer;
use crate::{FailureCategory, InvokeOutcome};

/// Protocol version tag required by the Anthropic
/// messages API on Bedrock
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Fixed generation parameters
const MAX_TOKENS: usize = 4000;
const TEMPERATURE: f64 = 0.7;

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelRequest
{   pub anthropic_version: String
  , pub max_tokens: usize
  , pub temperature: f64
  , pub messages: Vec<ChatMessage>
}

impl ModelRequest
{   /// Build the fixed-parameter request for one user prompt
    pub fn for_prompt(prompt: &str) -> Self
    {   ModelRequest
        {   anthropic_version: ANTHROPIC_VERSION.to_string()
          , max_tokens: MAX_TOKENS
          , temperature: TEMPERATURE
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt.to_string()
              }
            ]
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse
{   #[serde(default)]
    pub content: Vec<ContentBlock>
  , #[serde(default)]
    pub usage: Option<Value>
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServiceErrorBody
{   #[serde(default, rename = "__type")]
    error_type: Option<String>
  , #[serde(default)]
    code: Option<String>
  , #[serde(default, alias = "Message")]
    message: Option<String>
}

// ===== Bedrock Client =====

/// Client for the Bedrock invoke API.
/// Constructed once per process and shared across
/// invocations; holds no mutable state.
pub struct BedrockClient
{   config: GatewayConfig
  , http_client: reqwest::Client
  , signer: Option<SigV4Signer>
}

impl BedrockClient
{   /// Create a client from resolved configuration
    pub fn new(config: GatewayConfig) -> Self
    {   debug!(
          "Creating BedrockClient for region: {}",
          config.region
        );
        let signer = config.credentials.as_ref()
          .map(|creds| {
            SigV4Signer::new(
              creds.access_key_id.clone(),
              creds.secret_access_key.clone(),
              creds.session_token.clone(),
              config.region.clone()
            )
          });

        BedrockClient
        {   config
          , http_client: reqwest::Client::new()
          , signer
        }
    }

    /// Model identifier this client invokes
    pub fn model_id(&self) -> &str
    {   &self.config.model_id
    }

    fn invoke_url(&self) -> String
    {   format!(
          "https://bedrock-runtime.{}.amazonaws.com/model/{}/invoke",
          self.config.region,
          self.config.model_id
        )
    }

    /// Invoke the configured model with one user prompt.
    /// Total: every failure is classified and sanitized,
    /// nothing propagates to the caller.
    pub async fn invoke(&self, prompt: &str) -> InvokeOutcome
    {   info!(
          "Invoking Bedrock model: {}",
          self.config.model_id
        );
        match self.send_request(prompt).await
        {   Ok(body) => self.parse_success(&body)
          , Err(e) => failure_for(e)
        }
    }

    async fn send_request(&self, prompt: &str)
      -> Result<String, Error>
    {   let signer = self.signer.as_ref()
          .ok_or_else(|| {
            error!("No AWS credentials available for signing");
            Error::MissingCredentials(
              "credentials not found in environment"
                .to_string()
            )
          })?;

        let request = ModelRequest::for_prompt(prompt);
        let request_json = serde_json::to_string(&request)
          .map_err(|e| {
            error!("Request serialization failed: {}", e);
            Error::Other(e.to_string())
          })?;

        let url = self.invoke_url();
        trace!("Bedrock request to {}: {}", url, request_json);

        let mut headers = HashMap::new();
        headers.insert(
          "content-type".to_string(),
          "application/json".to_string()
        );
        headers.insert(
          "accept".to_string(),
          "application/json".to_string()
        );

        let signed_headers = signer.sign_request(
          "POST",
          &url,
          &headers,
          &request_json,
          chrono::Utc::now()
        )?;

        let mut request_builder
          = self.http_client.post(&url);
        for (name, value) in signed_headers
        {   request_builder
              = request_builder.header(name, value);
        }

        let response = request_builder
          .body(request_json)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error reaching Bedrock: {}", e);
            Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Bedrock response status: {}", status);

        if !status.is_success()
        {   let error_type = response
              .headers()
              .get("x-amzn-errortype")
              .and_then(|value| value.to_str().ok())
              .map(|value| value.to_string());
            let error_body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            let (code, message) = service_error_parts(
              error_type.as_deref(),
              &error_body
            );
            error!(
              "Bedrock service error: {} - {}",
              code, message
            );
            return Err(Error::ServiceError { code, message });
        }

        response.text().await.map_err(|e| {
          error!("Failed to read Bedrock response: {}", e);
          Error::Other(e.to_string())
        })
    }

    fn parse_success(&self, body: &str) -> InvokeOutcome
    {   let parsed: ModelResponse
          = match serde_json::from_str(body)
        {   Ok(response) => response
          , Err(e) => {
              error!("Unparseable Bedrock response: {}", e);
              return failure_for(
                Error::ParseError(e.to_string())
              );
            }
        };

        match parsed.content.first()
        {   Some(block) => {
              debug!(
                "Bedrock returned {} content item(s)",
                parsed.content.len()
              );
              InvokeOutcome::Success
              {   text: block.text.clone()
                , model_id: self.config.model_id.clone()
                , usage: parsed.usage.unwrap_or_else(|| {
                    Value::Object(Default::default())
                  })
              }
            }
          , None => {
              error!("Unexpected response format from Bedrock");
              failure_for(Error::EmptyContent)
            }
        }
    }
}

// ===== Failure Classification =====

/// Extract the machine-readable code and message from an
/// error reply. The code arrives in the x-amzn-errortype
/// header, or as __type / code inside the body.
fn service_error_parts(
  error_type_header: Option<&str>
, body: &str
) -> (String, String)
{   let parsed: ServiceErrorBody
      = serde_json::from_str(body).unwrap_or_default();

    let code = error_type_header
      .map(|value| value.to_string())
      .or(parsed.error_type)
      .or(parsed.code)
      .map(|raw| normalize_error_code(&raw))
      .unwrap_or_else(|| "UnknownError".to_string());

    let message = parsed.message
      .unwrap_or_else(|| "Unknown error".to_string());

    (code, message)
}

/// Strip the namespace and URI decoration AWS attaches
/// to error type identifiers.
fn normalize_error_code(raw: &str) -> String
{   let after_hash
      = raw.rsplit('#').next().unwrap_or(raw);
    let bare
      = after_hash.split(':').next().unwrap_or(after_hash);
    bare.trim().to_string()
}

/// Convert an internal error into its sanitized outcome
pub fn failure_for(err: Error) -> InvokeOutcome
{   match err
    {   Error::ServiceError { code, message } => {
          classify_service_error(&code, &message)
        }
      , Error::MissingCredentials(detail)
      | Error::SigningError(detail)
      | Error::HttpError(detail) => {
          error!(
            "Network or configuration failure: {}",
            detail
          );
          InvokeOutcome::Failure
          {   category: FailureCategory::Network
            , message:
                "Network or configuration error accessing Bedrock service"
                  .to_string()
          }
        }
      , Error::EmptyContent => {
          InvokeOutcome::Failure
          {   category: FailureCategory::UnexpectedFormat
            , message:
                "Unexpected response format from AI model"
                  .to_string()
          }
        }
      , Error::ParseError(detail)
      | Error::Other(detail) => {
          error!(
            "Unexpected error invoking Bedrock: {}",
            detail
          );
          InvokeOutcome::Failure
          {   category: FailureCategory::Internal
            , message:
                "Internal server error processing AI request"
                  .to_string()
          }
        }
    }
}

/// Map a structured service error code onto a caller-safe
/// message.
pub fn classify_service_error(
  code: &str
, message: &str
) -> InvokeOutcome
{   match code
    {   "AccessDeniedException" => InvokeOutcome::Failure
        {   category: FailureCategory::AccessDenied
          , message:
              "Access denied to Bedrock model. Please check IAM permissions."
                .to_string()
        }
      , "ValidationException" => InvokeOutcome::Failure
        {   category: FailureCategory::InvalidRequest
          , message:
              "Invalid request to Bedrock model.".to_string()
        }
      , "ThrottlingException" => InvokeOutcome::Failure
        {   category: FailureCategory::Throttled
          , message:
              "Request throttled. Please try again later."
                .to_string()
        }
      , _ => InvokeOutcome::Failure
        {   category: FailureCategory::Service
          , message: format!(
              "Bedrock service error: {}", message
            )
        }
    }
}
