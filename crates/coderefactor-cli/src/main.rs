#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use coderefactor_server::middleware::{RouterObservabilityExt, RouterRecoveryExt};
use coderefactor_server::routes;
use coderefactor_server::service::ServiceState;

use crate::config::{Cli, create_service_state};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "coderefactor_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "coderefactor_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "coderefactor_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli).context("failed to create service state")?;
    let router = create_router(state);

    server::serve(router, &cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - converts panics into 500 responses
/// 2. Observability - request IDs and tracing spans
/// 3. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState) -> Router {
    routes()
        .with_state(state)
        .with_observability()
        .with_recovery()
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use coderefactor_core::mock::{MockInference, MockStorage};
    use coderefactor_server::service::ServiceConfig;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn router_serves_translation() -> anyhow::Result<()> {
        let storage = MockStorage::new();
        let inference = MockInference::new().with_reply("anthropic.claude", "Code:\nputs 1");
        let state = ServiceState::new(
            ServiceConfig::default(),
            inference.into_service(),
            storage.clone().into_store(),
        );
        let server = TestServer::new(create_router(state))?;

        let response = server
            .post("/translate")
            .json(&json!({
                "sourceCode": "print(1)",
                "sourceLang": "python",
                "targetLang": "ruby",
                "UserID": "u-1",
            }))
            .await;

        response.assert_status_ok();
        assert!(!response.header("x-request-id").is_empty());
        assert_eq!(storage.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn router_answers_health() -> anyhow::Result<()> {
        let state = ServiceState::new(
            ServiceConfig::default(),
            MockInference::new().into_service(),
            MockStorage::new().into_store(),
        );
        let server = TestServer::new(create_router(state))?;

        server.get("/health").await.assert_status_ok();
        server.get("/missing").await.assert_status_not_found();
        Ok(())
    }
}
