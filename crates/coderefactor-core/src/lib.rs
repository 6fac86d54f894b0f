#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for inference operations.
pub const TRACING_TARGET_INFERENCE: &str = "coderefactor_core::inference";

/// Tracing target for artifact storage operations.
pub const TRACING_TARGET_STORAGE: &str = "coderefactor_core::storage";

mod error;

pub mod extract;
pub mod inference;
pub mod language;
pub mod prompt;
pub mod similarity;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
