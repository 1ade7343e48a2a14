//! AWS Signature Version 4 request signing

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use log::trace;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "bedrock";

/// SigV4 signer for Bedrock runtime requests
#[derive(Debug, Clone)]
pub struct SigV4Signer
{   access_key: String
  , secret_key: String
  , session_token: Option<String>
  , region: String
}

impl SigV4Signer
{   /// Create a signer for one set of credentials
    pub fn new(
      access_key: String
    , secret_key: String
    , session_token: Option<String>
    , region: String
    ) -> Self
    {   SigV4Signer
        {   access_key
          , secret_key
          , session_token
          , region
        }
    }

    /// Sign a request, returning the full header set to
    /// send (inputs plus host, x-amz-date, the session
    /// token when present, and Authorization).
    pub fn sign_request(
      &self
    , method: &str
    , url: &str
    , headers: &HashMap<String, String>
    , body: &str
    , timestamp: DateTime<Utc>
    ) -> Result<HashMap<String, String>, Error>
    {   let parsed_url = url::Url::parse(url)
          .map_err(|e| {
            Error::SigningError(format!("Invalid URL: {}", e))
          })?;

        let host = parsed_url.host_str()
          .ok_or_else(|| {
            Error::SigningError(
              "Missing host in URL".to_string()
            )
          })?;

        let path = parsed_url.path();
        let query = parsed_url.query().unwrap_or("");

        let amz_date = timestamp
          .format("%Y%m%dT%H%M%SZ")
          .to_string();
        let date_stamp = timestamp
          .format("%Y%m%d")
          .to_string();

        let mut canonical_headers = headers.clone();
        canonical_headers.insert(
          "host".to_string(),
          host.to_string()
        );
        canonical_headers.insert(
          "x-amz-date".to_string(),
          amz_date.clone()
        );
        if let Some(token) = &self.session_token
        {   canonical_headers.insert(
              "x-amz-security-token".to_string(),
              token.clone()
            );
        }

        // Canonical form sorts headers case-insensitively
        let mut sorted_headers: Vec<_>
          = canonical_headers.iter().collect();
        sorted_headers.sort_by(|a, b| {
          a.0.to_lowercase().cmp(&b.0.to_lowercase())
        });

        let canonical_headers_str = sorted_headers
          .iter()
          .map(|(name, value)| {
            format!("{}:{}", name.to_lowercase(), value.trim())
          })
          .collect::<Vec<_>>()
          .join("\n");

        let signed_headers = sorted_headers
          .iter()
          .map(|(name, _)| name.to_lowercase())
          .collect::<Vec<_>>()
          .join(";");

        let payload_hash
          = hex::encode(Sha256::digest(body.as_bytes()));
        let canonical_request = format!(
          "{}\n{}\n{}\n{}\n\n{}\n{}",
          method.to_uppercase(),
          path,
          query,
          canonical_headers_str,
          signed_headers,
          payload_hash
        );
        trace!("Canonical request:\n{}", canonical_request);

        let credential_scope = format!(
          "{}/{}/{}/aws4_request",
          date_stamp, self.region, SERVICE
        );
        let canonical_request_hash = hex::encode(
          Sha256::digest(canonical_request.as_bytes())
        );
        let string_to_sign = format!(
          "{}\n{}\n{}\n{}",
          ALGORITHM,
          amz_date,
          credential_scope,
          canonical_request_hash
        );

        let signature
          = self.signature(&string_to_sign, &date_stamp)?;

        let authorization = format!(
          "{} Credential={}/{}, SignedHeaders={}, Signature={}",
          ALGORITHM,
          self.access_key,
          credential_scope,
          signed_headers,
          signature
        );

        let mut final_headers = canonical_headers;
        final_headers.insert(
          "Authorization".to_string(),
          authorization
        );

        Ok(final_headers)
    }

    /// Derive the signing key and sign the string to sign
    fn signature(
      &self
    , string_to_sign: &str
    , date_stamp: &str
    ) -> Result<String, Error>
    {   let k_date = hmac_sha256(
          format!("AWS4{}", self.secret_key).as_bytes(),
          date_stamp.as_bytes()
        )?;
        let k_region
          = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service
          = hmac_sha256(&k_region, SERVICE.as_bytes())?;
        let k_signing
          = hmac_sha256(&k_service, b"aws4_request")?;

        let signature
          = hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8])
  -> Result<Vec<u8>, Error>
{   let mut mac = HmacSha256::new_from_slice(key)
      .map_err(|e| {
        Error::SigningError(format!("HMAC key error: {}", e))
      })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
