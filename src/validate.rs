//! Validation of incoming prompt submissions

use log::error;
use serde_json::Value;

/// Maximum accepted prompt length in characters
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Validate the raw request body.
/// Returns None when valid, or a caller-safe rejection
/// reason. Checks run in order and stop at the first
/// failure.
pub fn validate_request(body: &[u8]) -> Option<String>
{   if body.is_empty()
    {   return Some("Request body is required".to_string());
    }

    let parsed: Value = match serde_json::from_slice(body)
    {   Ok(value) => value
      , Err(_) => {
          return Some(
            "Invalid JSON in request body".to_string()
          );
        }
    };

    let prompt = match parsed.get("prompt")
    {   Some(value) => value
      , None => {
          return Some(
            "Missing 'prompt' field in request body"
              .to_string()
          );
        }
    };

    let prompt = match prompt.as_str()
    {   Some(text) => text
      , None => {
          return Some("Prompt must be a string".to_string());
        }
    };

    if prompt.trim().is_empty()
    {   return Some("Prompt cannot be empty".to_string());
    }

    // Untrimmed length, counted in characters
    if prompt.chars().count() > MAX_PROMPT_CHARS
    {   return Some(format!(
          "Prompt exceeds maximum length of {} characters",
          MAX_PROMPT_CHARS
        ));
    }

    None
}

/// Extract the trimmed prompt from an already validated
/// body.
pub fn extract_prompt(body: &[u8])
  -> Result<String, crate::error::Error>
{   let parsed: Value = serde_json::from_slice(body)
      .map_err(|e| {
        error!("Prompt extraction failed: {}", e);
        crate::error::Error::ParseError(e.to_string())
      })?;

    parsed.get("prompt")
      .and_then(|value| value.as_str())
      .map(|text| text.trim().to_string())
      .ok_or_else(|| {
        error!("Prompt field missing after validation");
        crate::error::Error::ParseError(
          "missing 'prompt' field".to_string()
        )
      })
}
