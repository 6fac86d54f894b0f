//! Runtime client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default region of the model runtime.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default generation length limit.
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default nucleus sampling mass, sent to completion-style models only.
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Configuration for the model runtime client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct BedrockConfig {
    /// Region hosting the runtime endpoint.
    #[cfg_attr(
        feature = "config",
        arg(id = "bedrock_region", long = "bedrock-region", env = "BEDROCK_REGION", default_value = DEFAULT_REGION)
    )]
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit endpoint overriding the regional default.
    #[cfg_attr(
        feature = "config",
        arg(id = "bedrock_endpoint", long = "bedrock-endpoint", env = "BEDROCK_ENDPOINT")
    )]
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer API key sent with every request.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-api-key", env = "AWS_BEARER_TOKEN_BEDROCK", hide_env_values = true)
    )]
    #[serde(default)]
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-timeout", env = "BEDROCK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of generated tokens.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-max-tokens", env = "BEDROCK_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)
    )]
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-temperature", env = "BEDROCK_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)
    )]
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling mass.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-top-p", env = "BEDROCK_TOP_P", default_value_t = DEFAULT_TOP_P)
    )]
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl BedrockConfig {
    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set an explicit endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the bearer API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the base URL requests are sent to.
    pub fn endpoint_url(&self) -> Result<Url> {
        let raw = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        };

        let url = Url::parse(&raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidEndpoint(raw));
        }

        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() && self.endpoint.is_none() {
            return Err(Error::InvalidEndpoint(
                "either a region or an endpoint is required".to_owned(),
            ));
        }

        self.endpoint_url()?;

        if self.max_tokens == 0 {
            return Err(Error::InvalidParameter("max_tokens must be positive".to_owned()));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::InvalidParameter(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(Error::InvalidParameter(format!(
                "top_p must be within [0, 1], got {}",
                self.top_p
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for BedrockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}
