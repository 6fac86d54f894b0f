//! Construction of the backend clients injected into the handlers.

use anyhow::Context;
use coderefactor_bedrock::BedrockClient;
use coderefactor_opendal::{StorageBackend, StorageConfig};
use coderefactor_server::service::ServiceState;

use super::Cli;
use crate::TRACING_TARGET_SERVER_STARTUP;

/// Builds the inference client and storage backend and assembles the state.
pub fn create_service_state(cli: &Cli) -> anyhow::Result<ServiceState> {
    let inference = BedrockClient::new(cli.bedrock.clone())
        .context("failed to create inference client")?
        .into_service();

    let backend = StorageBackend::new(StorageConfig::from(cli.storage.clone()))
        .context("failed to create storage backend")?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        backend = backend.config().backend_name(),
        "Service state created"
    );

    Ok(ServiceState::new(
        cli.service.clone(),
        inference,
        backend.into_store(),
    ))
}
