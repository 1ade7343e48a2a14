//! Request orchestration for the Lambda entry point

use lambda_http::{Body, Request, Response};
use lambda_http::http::Method;
use log::{error, info, warn};
use serde_json::json;

use crate::InvokeOutcome;
use crate::providers::bedrock::BedrockClient;

/// Handle one incoming API Gateway event.
/// Total: every path produces exactly one response
/// envelope.
pub async fn handle_event(
  client: &BedrockClient
, event: Request
) -> Response<Body>
{   info!(
      "Received {} request on {}",
      event.method(),
      event.uri().path()
    );

    // CORS preflight bypasses validation and invocation
    if event.method() == Method::OPTIONS
    {   info!("Answering CORS preflight");
        return crate::response::create_response(
          200,
          &json!({ "message": "CORS preflight successful" })
        );
    }

    let body = event.body();

    if let Some(reason) = crate::validate::validate_request(body)
    {   warn!("Request validation failed: {}", reason);
        return crate::response::create_response(
          400,
          &json!({
            "error": "Bad Request",
            "message": reason
          })
        );
    }

    // Re-parse defensively; validation already vouched
    // for the body
    let prompt = match crate::validate::extract_prompt(body)
    {   Ok(prompt) => prompt
      , Err(e) => {
          error!("Late JSON decode error: {}", e);
          return crate::response::create_response(
            400,
            &json!({
              "error": "Bad Request",
              "message": "Invalid JSON in request body"
            })
          );
        }
    };

    info!(
      "Processing prompt of length: {}",
      prompt.chars().count()
    );

    let outcome = client.invoke(&prompt).await;
    response_for_outcome(&outcome)
}

/// Map an invocation outcome onto its response envelope
pub fn response_for_outcome(
  outcome: &InvokeOutcome
) -> Response<Body>
{   match outcome
    {   InvokeOutcome::Success { text, model_id, usage } => {
          info!("Successfully generated response from Bedrock");
          crate::response::create_response(
            200,
            &json!({
              "message": "Success",
              "response": text,
              "model_id": model_id,
              "usage": usage
            })
          )
        }
      , InvokeOutcome::Failure { category, message } => {
          error!(
            "Bedrock invocation failed ({}): {}",
            category.as_str(),
            message
          );
          crate::response::create_response(
            500,
            &json!({
              "error": "Internal Server Error",
              "message": message
            })
          )
        }
    }
}
