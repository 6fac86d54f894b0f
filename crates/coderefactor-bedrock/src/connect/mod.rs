//! Runtime client module.
//!
//! This module provides the client interface for model invocation.
//! It wraps the `reqwest` crate and the envelopes in [`crate::model`].

mod client;
mod config;

pub use client::BedrockClient;
pub use config::{
    BedrockConfig, DEFAULT_MAX_TOKENS, DEFAULT_REGION, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOP_P,
};
