#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for runtime client operations.
pub const TRACING_TARGET: &str = "coderefactor_bedrock";

mod connect;
mod error;
pub mod model;

pub use crate::connect::{
    BedrockClient, BedrockConfig, DEFAULT_MAX_TOKENS, DEFAULT_REGION, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_P,
};
pub use crate::error::{Error, Result};
pub use crate::model::{InferenceParams, ModelFamily};
