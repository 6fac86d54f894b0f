//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig     # Host, port, shutdown
//! ├── service: ServiceConfig   # Primary and cross-check model IDs
//! ├── bedrock: BedrockConfig   # Inference runtime endpoint and sampling
//! └── storage: S3Config        # Artifact bucket
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//!
//! ```bash
//! coderefactor --s3-bucket artifacts --port 8080
//!
//! S3_BUCKET=artifacts PORT=8080 coderefactor
//! ```

mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use coderefactor_bedrock::BedrockConfig;
use coderefactor_opendal::S3Config;
use coderefactor_server::service::ServiceConfig;
pub use provider::create_service_state;
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "coderefactor")]
#[command(about = "Source code translation server backed by hosted language models")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Model selection.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Inference runtime client configuration.
    #[clap(flatten)]
    pub bedrock: BedrockConfig,

    /// Artifact storage configuration.
    #[clap(flatten)]
    pub storage: S3Config,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.bedrock
            .validate()
            .context("invalid inference configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            primary_model = %self.service.primary_model,
            secondary_model = %self.service.secondary_model,
            bedrock_region = %self.bedrock.region,
            bedrock_endpoint = ?self.bedrock.endpoint,
            bedrock_timeout_secs = self.bedrock.timeout_secs,
            has_api_key = self.bedrock.api_key.is_some(),
            "Inference configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            bucket = %self.storage.bucket,
            region = %self.storage.region,
            endpoint = ?self.storage.endpoint,
            static_credentials = self.storage.access_key_id.is_some(),
            "Storage configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
