//! Configuration for the Bedrock gateway

use std::env;
use log::debug;

/// Region used when the environment names none
pub const DEFAULT_REGION: &str = "us-west-2";

/// Model invoked when BEDROCK_MODEL_ID is unset
pub const DEFAULT_MODEL_ID: &str
  = "anthropic.claude-3-5-haiku-20241022-v1:0";

/// AWS credentials used for request signing
#[derive(Debug, Clone)]
pub struct AwsCredentials
{   pub access_key_id: String
  , pub secret_access_key: String
  , /// Present for the temporary credentials Lambda issues
    pub session_token: Option<String>
}

impl AwsCredentials
{   /// Read credentials from the standard environment.
    /// Returns None when the key pair is absent.
    pub fn from_env() -> Option<Self>
    {   let access_key_id
          = env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key
          = env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        let session_token
          = env::var("AWS_SESSION_TOKEN").ok();

        Some(AwsCredentials
        {   access_key_id
          , secret_access_key
          , session_token
        })
    }
}

/// Gateway configuration, resolved once per process
#[derive(Debug, Clone)]
pub struct GatewayConfig
{   /// Region hosting the Bedrock runtime endpoint
    pub region: String
  , /// Bedrock model identifier
    pub model_id: String
  , /// Signing credentials, when the environment has them
    pub credentials: Option<AwsCredentials>
}

impl GatewayConfig
{   /// Build the configuration from environment variables,
    /// falling back to the documented defaults.
    pub fn from_env() -> Self
    {   let region = env::var("AWS_REGION")
          .or_else(|_| env::var("AWS_DEFAULT_REGION"))
          .unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let model_id = env::var("BEDROCK_MODEL_ID")
          .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        debug!(
          "Gateway config: region={} model={}",
          region, model_id
        );

        GatewayConfig
        {   region
          , model_id
          , credentials: AwsCredentials::from_env()
        }
    }
}

impl Default for GatewayConfig
{   fn default() -> Self
    {   GatewayConfig
        {   region: DEFAULT_REGION.to_string()
          , model_id: DEFAULT_MODEL_ID.to_string()
          , credentials: None
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn default_config_uses_documented_values()
    {   let config = GatewayConfig::default();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(
          config.model_id,
          "anthropic.claude-3-5-haiku-20241022-v1:0"
        );
        assert!(config.credentials.is_none());
    }
}
