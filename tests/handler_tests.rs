use lambda_http::Body;
use lambda_http::Response;
use serde_json::{json, Value};

use bedrock_gateway::config::GatewayConfig;
use bedrock_gateway::handler::{
  handle_event, response_for_outcome
};
use bedrock_gateway::providers::bedrock::BedrockClient;
use bedrock_gateway::{FailureCategory, InvokeOutcome};

/// Client with no credentials: validation paths never
/// reach the network, and the invoke path fails before
/// any connection is attempted.
fn gateway_client() -> BedrockClient
{   BedrockClient::new(GatewayConfig::default())
}

fn request(method: &str, body: Body)
  -> lambda_http::Request
{   lambda_http::http::Request::builder()
      .method(method)
      .uri("/")
      .body(body)
      .expect("request")
}

fn json_body(response: &Response<Body>) -> Value
{   serde_json::from_slice(response.body())
      .expect("response body is JSON")
}

#[tokio::test]
async fn options_preflight_bypasses_everything()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("OPTIONS", Body::Empty)
    ).await;

    assert_eq!(response.status(), 200);
    let body = json_body(&response);
    assert_eq!(body["message"], "CORS preflight successful");
    assert_eq!(
      response.headers()
        .get("Access-Control-Allow-Origin")
        .and_then(|v| v.to_str().ok()),
      Some("*")
    );
}

#[tokio::test]
async fn missing_body_is_a_bad_request()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("POST", Body::Empty)
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "Request body is required");
}

#[tokio::test]
async fn invalid_json_is_a_bad_request()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("POST", Body::from("invalid json"))
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(
      body["message"],
      "Invalid JSON in request body"
    );
}

#[tokio::test]
async fn truncated_json_is_a_bad_request()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("POST", Body::from(r#"{"prompt": "Hello"#))
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(
      body["message"],
      "Invalid JSON in request body"
    );
}

#[tokio::test]
async fn missing_prompt_field_is_a_bad_request()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request(
        "POST",
        Body::from(r#"{"message": "hello"}"#)
      )
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(
      body["message"],
      "Missing 'prompt' field in request body"
    );
}

#[tokio::test]
async fn non_string_prompt_is_a_bad_request()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("POST", Body::from(r#"{"prompt": 123}"#))
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(body["message"], "Prompt must be a string");
}

#[tokio::test]
async fn oversized_prompt_is_a_bad_request()
{   let client = gateway_client();
    let payload = json!({ "prompt": "a".repeat(4001) });
    let response = handle_event(
      &client,
      request("POST", Body::from(payload.to_string()))
    ).await;

    assert_eq!(response.status(), 400);
    let body = json_body(&response);
    assert_eq!(
      body["message"],
      "Prompt exceeds maximum length of 4000 characters"
    );
}

#[tokio::test]
async fn valid_prompt_without_credentials_is_a_server_error()
{   let client = gateway_client();
    let response = handle_event(
      &client,
      request("POST", Body::from(r#"{"prompt": "Hello"}"#))
    ).await;

    assert_eq!(response.status(), 500);
    let body = json_body(&response);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(
      body["message"],
      "Network or configuration error accessing Bedrock service"
    );
}

#[tokio::test]
async fn success_outcome_maps_to_the_documented_envelope()
{   let outcome = InvokeOutcome::Success
    {   text: "Hello! How can I help you today?".to_string()
      , model_id:
          "anthropic.claude-3-5-haiku-20241022-v1:0"
            .to_string()
      , usage: json!({
          "input_tokens": 10,
          "output_tokens": 15
        })
    };

    let response = response_for_outcome(&outcome);
    assert_eq!(response.status(), 200);

    let body = json_body(&response);
    assert_eq!(body["message"], "Success");
    assert_eq!(
      body["response"],
      "Hello! How can I help you today?"
    );
    assert_eq!(
      body["model_id"],
      "anthropic.claude-3-5-haiku-20241022-v1:0"
    );
    assert_eq!(
      body["usage"],
      json!({ "input_tokens": 10, "output_tokens": 15 })
    );
}

#[tokio::test]
async fn failure_outcomes_map_to_server_errors()
{   let failures = vec![
      ( FailureCategory::AccessDenied
      , "Access denied to Bedrock model. Please check IAM permissions."
      )
    , ( FailureCategory::Throttled
      , "Request throttled. Please try again later."
      )
    , ( FailureCategory::UnexpectedFormat
      , "Unexpected response format from AI model"
      )
    , ( FailureCategory::Internal
      , "Internal server error processing AI request"
      )
    ];

    for (category, message) in failures
    {   let outcome = InvokeOutcome::Failure
        {   category
          , message: message.to_string()
        };

        let response = response_for_outcome(&outcome);
        assert_eq!(response.status(), 500);

        let body = json_body(&response);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], message);
    }
}
