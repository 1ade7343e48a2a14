pub mod error;
pub mod config;
pub mod providers;
pub mod validate;
pub mod response;
pub mod handler;

/*

bedrock-gateway: single-endpoint prompt gateway for
Amazon Bedrock, deployed as a Lambda function behind
API Gateway.

bedrock-gateway/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and core outcome types
│   ├── error.rs        # Internal error types and handling
│   ├── config.rs       # Region, model id and credentials
│   ├── validate.rs     # Incoming request validation
│   ├── response.rs     # Response envelope construction
│   ├── handler.rs      # Request orchestration
│   ├── providers/      # Provider-specific implementations
│   │   ├── mod.rs      # Re-exports all providers
│   │   ├── bedrock.rs  # Bedrock invoke API client
│   │   └── sigv4.rs    # AWS SigV4 request signing
│   └── main.rs         # Lambda runtime bootstrap
└── tests/              # Handler integration tests

*/

/// GATEWAY STRUCTURES:

/// Outcome of one model invocation.
/// Failure messages are already sanitized for the caller;
/// raw service detail only ever reaches the log.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeOutcome
{   Success
    {   /// Generated text from the first content item
        text: String
      , /// Model identifier that produced the text
        model_id: String
      , /// Token usage statistics reported by the API,
        /// an empty object when the API omitted them
        usage: serde_json::Value
    }
  , Failure
    {   category: FailureCategory
      , message: String
    }
}

/// Coarse classification of invocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory
{   /// IAM rejected the invocation
    AccessDenied
  , /// Bedrock rejected the request payload
    InvalidRequest
  , /// The service throttled the request
    Throttled
  , /// Any other structured service error
    Service
  , /// Well-formed reply without content items
    UnexpectedFormat
  , /// Transport, credential or signing failure
    Network
  , /// Everything else
    Internal
}

impl FailureCategory
{   /// Stable snake_case name used in logs
    pub fn as_str(&self) -> &'static str
    {   match self
        {   FailureCategory::AccessDenied => "access_denied"
          , FailureCategory::InvalidRequest => "invalid_request"
          , FailureCategory::Throttled => "throttled"
          , FailureCategory::Service => "service_error"
          , FailureCategory::UnexpectedFormat => "unexpected_format"
          , FailureCategory::Network => "network"
          , FailureCategory::Internal => "internal"
        }
    }
}
