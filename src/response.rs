//! Response envelope construction

use lambda_http::Body;
use lambda_http::Response;
use lambda_http::http::StatusCode;
use lambda_http::http::header::{HeaderName, HeaderValue};
use log::error;
use serde_json::Value;
use std::collections::BTreeMap;

/// Body used when envelope construction itself fails
const FALLBACK_BODY: &str
  = r#"{"error":"Internal Server Error","message":"An unexpected error occurred"}"#;

/// Headers applied to every response
const DEFAULT_HEADERS: [(&str, &str); 4] =
[   ("Content-Type", "application/json")
  , ("Access-Control-Allow-Origin", "*")
  , ("Access-Control-Allow-Methods", "POST, OPTIONS")
  , ("Access-Control-Allow-Headers", "Content-Type, Authorization")
];

/// Build a response envelope with the default headers.
pub fn create_response(
  status: u16
, body: &Value
) -> Response<Body>
{   create_response_with_headers(status, body, &[])
}

/// Build a response envelope. Caller-supplied headers
/// override or extend the defaults. Total: falls back to
/// a fixed 500 envelope rather than failing.
pub fn create_response_with_headers(
  status: u16
, body: &Value
, extra_headers: &[(&str, &str)]
) -> Response<Body>
{   let mut headers: BTreeMap<&str, &str>
      = BTreeMap::new();
    for (name, value) in DEFAULT_HEADERS
    {   headers.insert(name, value);
    }
    for &(name, value) in extra_headers
    {   headers.insert(name, value);
    }

    let (status, body_json) = match serde_json::to_string(body)
    {   Ok(serialized) => (status, serialized)
      , Err(e) => {
          error!("Response serialization failed: {}", e);
          (500, FALLBACK_BODY.to_string())
        }
    };

    let mut response = Response::new(Body::from(body_json));
    *response.status_mut() = StatusCode::from_u16(status)
      .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    for (name, value) in headers
    {   if let (Ok(header_name), Ok(header_value)) = (
          HeaderName::from_bytes(name.as_bytes()),
          HeaderValue::from_str(value),
        )
        {   response.headers_mut()
              .insert(header_name, header_value);
        } else
        {   error!("Skipping invalid header: {}", name);
        }
    }

    response
}
