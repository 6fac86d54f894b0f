//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,ignore
//! use coderefactor_server::handler::routes;
//! use coderefactor_server::service::ServiceState;
//!
//! let app = routes().with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod compare;
mod error;
mod languages;
mod monitors;
mod request;
mod response;
mod translate;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{CompareCode, TranslateCode, Translation};
pub use crate::handler::response::{
    Comparison, ErrorResponse, LanguageEntry, Languages, MonitorStatus, Translated,
    TranslationFailure,
};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

#[inline]
async fn method_not_allowed() -> Response {
    ErrorKind::MethodNotAllowed.into_response()
}

/// Returns a [`Router`] with all routes and the JSON error fallbacks.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(compare::routes())
        .merge(translate::routes())
        .merge(monitors::routes())
        .merge(languages::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;
    use coderefactor_core::mock::{MockInference, MockStorage};

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] with all routes and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] backed by the given mocks and default models.
    pub fn create_test_server(
        inference: MockInference,
        storage: MockStorage,
    ) -> anyhow::Result<TestServer> {
        let state = ServiceState::new(
            ServiceConfig::default(),
            inference.into_service(),
            storage.into_store(),
        );
        create_test_server_with_state(state)
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server(MockInference::new(), MockStorage::new())?;

        let response = server.get("/convert").await;
        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({
            "name": "not_found",
            "message": "The requested resource was not found",
        }));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server(MockInference::new(), MockStorage::new())?;

        let response = server.get("/compare").await;
        response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<serde_json::Value>()["name"],
            "method_not_allowed"
        );
        Ok(())
    }
}
