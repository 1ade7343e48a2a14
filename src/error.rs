use std::fmt;

/// Internal error type for gateway operations
/// Implements Clone for reuse across log and outcome paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// AWS credentials are missing from the environment
    MissingCredentials(String)
  , /// Request signing failed
    SigningError(String)
  , /// HTTP request error
    HttpError(String)
  , /// Bedrock returned a structured service error
    ServiceError
    {   code: String
      , message: String
    }
  , /// Failed to parse a JSON payload
    ParseError(String)
  , /// Reply contained no content items
    EmptyContent
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingCredentials(detail) => {
              write!(f, "Missing AWS credentials: {}", detail)
            }
          , Error::SigningError(msg) => {
              write!(f, "Request signing error: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ServiceError { code, message } => {
              write!(f, "Service error {}: {}", code, message)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::EmptyContent => {
              write!(f, "API response contained no content")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
