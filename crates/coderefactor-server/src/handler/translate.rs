//! Single-model translation persisted as an artifact.
//!
//! Every failure after the request is read is reported as one generic
//! internal error carrying the failure description. A stored artifact is
//! not removed if a later step fails.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use coderefactor_core::extract::CodeExtractor;
use coderefactor_core::inference::InferenceService;
use coderefactor_core::prompt::PromptBuilder;
use coderefactor_core::storage::ArtifactStore;

use super::request::{TranslateCode, Translation};
use super::response::{Translated, TranslationFailure};
use crate::service::{ServiceConfig, ServiceState};

/// Tracing target for translation operations.
const TRACING_TARGET: &str = "coderefactor_server::handler::translate";

/// Attaches the permissive cross-origin header used by the web front end.
fn with_cors(status: StatusCode, body: impl IntoResponse) -> Response {
    (status, [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], body).into_response()
}

/// Translates, extracts and stores the result of one request.
async fn translate_and_store(
    inference: &InferenceService,
    artifacts: &ArtifactStore,
    config: &ServiceConfig,
    translation: Translation,
) -> coderefactor_core::Result<Translated> {
    let model_id = config.translation_model()?;
    let prompt = PromptBuilder::new(
        &translation.source_code,
        &translation.source_lang,
        &translation.target_lang,
    )
    .with_reply_marker()
    .build();

    let invocation = inference.invoke(model_id, &prompt).await?;
    if invocation.is_empty() {
        return Err(coderefactor_core::Error::empty_response()
            .with_message(format!("model {} returned no text", invocation.model_id)));
    }

    let code = CodeExtractor::labeled()
        .extract(&invocation.response, Some(translation.target_lang.as_str()));

    tracing::debug!(
        target: TRACING_TARGET,
        strategy = ?code.strategy(),
        code_len = code.as_str().len(),
        "Code extracted"
    );

    let stored = artifacts
        .store(&translation.user_id, &translation.target_lang, code.as_str())
        .await?;

    Ok(Translated {
        converted_code: code.into_string(),
        s3_key: stored.key,
    })
}

#[tracing::instrument(skip_all)]
async fn translate(
    State(inference): State<InferenceService>,
    State(artifacts): State<ArtifactStore>,
    State(config): State<ServiceConfig>,
    body: Bytes,
) -> Response {
    let request = match TranslateCode::from_body(&body) {
        Ok(request) => request,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Request body could not be parsed"
            );
            let failure = TranslationFailure::internal(format!("invalid request body: {error}"));
            return with_cors(StatusCode::INTERNAL_SERVER_ERROR, Json(failure));
        }
    };

    let Some(translation) = request.into_translation() else {
        tracing::debug!(
            target: TRACING_TARGET,
            "Rejecting request with missing fields"
        );
        return with_cors(
            StatusCode::BAD_REQUEST,
            Json(TranslationFailure::missing_fields()),
        );
    };

    tracing::debug!(
        target: TRACING_TARGET,
        user_id = %translation.user_id,
        source_lang = %translation.source_lang,
        target_lang = %translation.target_lang,
        "Translation requested"
    );

    match translate_and_store(&inference, &artifacts, &config, translation).await {
        Ok(translated) => {
            tracing::info!(
                target: TRACING_TARGET,
                key = %translated.s3_key,
                "Translation stored"
            );
            with_cors(StatusCode::OK, Json(translated))
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                error_kind = error.kind_str(),
                "Translation failed"
            );
            with_cors(
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TranslationFailure::internal(&error)),
            )
        }
    }
}

/// Answers cross-origin preflight requests.
async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}

/// Returns a [`Router`] with the translation routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/translate", post(translate).options(preflight))
}
