//! Two-model Python to Java translation with agreement scoring.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use coderefactor_core::extract::CodeExtractor;
use coderefactor_core::inference::InferenceService;
use coderefactor_core::prompt::{COMPARISON_TARGET_LANG, PromptBuilder};
use coderefactor_core::similarity::SimilarityScore;

use super::request::CompareCode;
use super::response::Comparison;
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceConfig, ServiceState};

/// Tracing target for comparison operations.
const TRACING_TARGET: &str = "coderefactor_server::handler::compare";

/// Translates with both models in sequence and compares the results.
///
/// Model failures are not recovered here and surface as generic errors.
#[tracing::instrument(skip_all)]
async fn compare(
    State(inference): State<InferenceService>,
    State(config): State<ServiceConfig>,
    body: Bytes,
) -> Result<Comparison> {
    let request = CompareCode::from_body(&body).map_err(|error| {
        ErrorKind::BadRequest
            .with_message("Request body is not valid JSON")
            .with_context(error.to_string())
    })?;

    let Some(source_code) = request.source_code() else {
        tracing::debug!(
            target: TRACING_TARGET,
            "Rejecting request without source code"
        );
        return Ok(Comparison::missing_source_code());
    };

    let prompt = PromptBuilder::comparison(source_code).build();
    let primary = inference.invoke(&config.primary_model, &prompt).await?;
    let secondary = inference.invoke(&config.secondary_model, &prompt).await?;

    let extractor = CodeExtractor::new();
    let expected = COMPARISON_TARGET_LANG.to_lowercase();
    let java_claude = extractor.extract(&primary.response, Some(expected.as_str()));
    let java_llama = extractor.extract(&secondary.response, Some(expected.as_str()));

    let similarity = SimilarityScore::between(&java_claude, &java_llama);

    tracing::info!(
        target: TRACING_TARGET,
        similarity = %similarity,
        agreement = similarity.is_agreement(),
        primary_strategy = ?java_claude.strategy(),
        secondary_strategy = ?java_llama.strategy(),
        "Comparison completed"
    );

    if similarity.is_agreement() {
        Ok(Comparison::agreed(similarity, java_claude.into_string()))
    } else {
        Ok(Comparison::diverged(
            similarity,
            java_claude.into_string(),
            java_llama.into_string(),
        ))
    }
}

/// Returns a [`Router`] with the comparison route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/compare", post(compare))
}
