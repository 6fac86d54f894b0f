//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};

use super::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "coderefactor_server::handler::monitors";

/// Reports that the process is serving requests.
///
/// Backends are not checked; a model or storage outage surfaces on the
/// translation routes instead.
#[tracing::instrument(skip_all)]
async fn health_status() -> Json<MonitorStatus> {
    tracing::trace!(target: TRACING_TARGET, "Health status requested");
    Json(MonitorStatus::default())
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use coderefactor_core::mock::{MockInference, MockStorage};

    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn reports_ok() -> anyhow::Result<()> {
        let inference = MockInference::new();
        let server = create_test_server(inference.clone(), MockStorage::new())?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatus>();
        assert_eq!(status.status, "ok");
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(inference.call_count(), 0);
        Ok(())
    }
}
