//! Catalog of languages offered for translation.

use axum::routing::get;
use axum::{Json, Router};

use super::response::Languages;
use crate::service::ServiceState;

#[tracing::instrument(skip_all)]
async fn list_languages() -> Json<Languages> {
    Json(Languages::default())
}

/// Returns a [`Router`] with the language catalog route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/languages", get(list_languages))
}

#[cfg(test)]
mod tests {
    use coderefactor_core::mock::{MockInference, MockStorage};
    use serde_json::Value;

    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn lists_all_languages() -> anyhow::Result<()> {
        let server = create_test_server(MockInference::new(), MockStorage::new())?;

        let response = server.get("/languages").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let languages = body["languages"].as_array().cloned().unwrap_or_default();
        assert_eq!(languages.len(), 10);
        assert!(
            languages
                .iter()
                .any(|entry| entry["id"] == "python" && entry["name"] == "Python")
        );
        Ok(())
    }
}
