//! Reqwest-based client for the hosted model runtime.

use std::sync::Arc;
use std::time::Instant;

use coderefactor_core::inference::{InferenceProvider, InferenceService};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use super::BedrockConfig;
use crate::TRACING_TARGET;
use crate::error::{Error, Result};
use crate::model::{InferenceParams, ModelFamily};

/// Longest response body kept in error messages.
const MAX_ERROR_BODY: usize = 1024;

/// Inner client that holds the HTTP client and configuration.
struct BedrockClientInner {
    http: Client,
    endpoint: Url,
    params: InferenceParams,
    config: BedrockConfig,
}

/// Client for the `POST /model/{model_id}/invoke` runtime interface.
///
/// Requests are sent once; there are no retries.
///
/// # Examples
///
/// ```rust,ignore
/// use coderefactor_bedrock::{BedrockClient, BedrockConfig};
/// use coderefactor_core::inference::InferenceProvider;
///
/// let client = BedrockClient::new(BedrockConfig::default())?;
/// let text = client
///     .invoke("meta.llama3-70b-instruct-v1:0", "Convert ...")
///     .await?;
/// ```
#[derive(Clone)]
pub struct BedrockClient {
    inner: Arc<BedrockClientInner>,
}

impl std::fmt::Debug for BedrockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl BedrockClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: BedrockConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            timeout_ms = config.timeout().as_millis(),
            "Creating runtime client"
        );

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("coderefactor/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let inner = BedrockClientInner {
            http,
            endpoint,
            params: InferenceParams::from(&config),
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Runtime client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &BedrockConfig {
        &self.inner.config
    }

    /// Gets the sampling parameters sent with every request.
    pub fn params(&self) -> &InferenceParams {
        &self.inner.params
    }

    /// Returns the invocation URL for `model_id`.
    pub fn invoke_url(&self, model_id: &str) -> Result<Url> {
        let mut url = self.inner.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(self.inner.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);
        Ok(url)
    }

    /// Converts this client into an [`InferenceService`] for use with dependency injection.
    pub fn into_service(self) -> InferenceService {
        InferenceService::new(self)
    }

    /// Sends `prompt` to a model of the given family and decodes the reply.
    pub async fn invoke_family(
        &self,
        family: ModelFamily,
        model_id: &str,
        prompt: &str,
    ) -> Result<String> {
        let started_at = Instant::now();
        let url = self.invoke_url(model_id)?;
        let body = family.encode(prompt, &self.inner.params)?;

        tracing::debug!(
            target: TRACING_TARGET,
            model_id = %model_id,
            family = %family,
            body_len = body.len(),
            "Sending invocation"
        );

        let mut request = self
            .inner
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);

        if let Some(api_key) = &self.inner.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();

            tracing::warn!(
                target: TRACING_TARGET,
                model_id = %model_id,
                status = status.as_u16(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "Runtime rejected invocation"
            );

            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = family.decode(&bytes)?;

        tracing::debug!(
            target: TRACING_TARGET,
            model_id = %model_id,
            text_len = text.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Invocation completed"
        );

        Ok(text)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for BedrockClient {
    async fn invoke(&self, model_id: &str, prompt: &str) -> coderefactor_core::Result<String> {
        let Some(family) = ModelFamily::lookup(model_id) else {
            return Err(coderefactor_core::Error::unsupported_model()
                .with_message(format!("unsupported model: {model_id}")));
        };

        Ok(self.invoke_family(family, model_id, prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::post;
    use axum::{Json, Router};
    use coderefactor_core::ErrorKind;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    #[derive(Debug, Clone)]
    struct Recorded {
        model_id: String,
        authorization: Option<String>,
        accept: Option<String>,
        body: Value,
    }

    type Calls = Arc<Mutex<Vec<Recorded>>>;

    async fn stub_invoke(
        State(calls): State<Calls>,
        Path(model_id): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let value_of = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        calls.lock().unwrap().push(Recorded {
            model_id: model_id.clone(),
            authorization: value_of(header::AUTHORIZATION.as_str()),
            accept: value_of(header::ACCEPT.as_str()),
            body,
        });

        if model_id.ends_with("denied") {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"message": "access denied"})),
            );
        }

        if model_id.starts_with("anthropic.claude") {
            (
                StatusCode::OK,
                Json(json!({"content": [{"type": "text", "text": "Code:\nclass A {}"}]})),
            )
        } else {
            (
                StatusCode::OK,
                Json(json!({"generation": "```java\nclass A {}\n```"})),
            )
        }
    }

    async fn spawn_stub() -> anyhow::Result<(BedrockClient, Calls)> {
        let calls = Calls::default();
        let app = Router::new()
            .route("/model/{model_id}/invoke", post(stub_invoke))
            .with_state(calls.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move { axum::serve(listener, app).await });

        let config = BedrockConfig::default()
            .with_endpoint(format!("http://{addr}"))
            .with_api_key("test-key");
        Ok((BedrockClient::new(config)?, calls))
    }

    #[test]
    fn invoke_url_layout() -> anyhow::Result<()> {
        let client = BedrockClient::new(BedrockConfig::default())?;
        let url = client.invoke_url("anthropic.claude-3-sonnet-20240229-v1:0")?;
        assert_eq!(
            url.as_str(),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/anthropic.claude-3-sonnet-20240229-v1:0/invoke"
        );
        Ok(())
    }

    #[tokio::test]
    async fn invokes_chat_model() -> anyhow::Result<()> {
        let (client, calls) = spawn_stub().await?;

        let text = client
            .invoke("anthropic.claude-3-sonnet-20240229-v1:0", "prompt")
            .await?;
        assert_eq!(text, "Code:\nclass A {}");

        let calls = calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model_id, "anthropic.claude-3-sonnet-20240229-v1:0");
        assert_eq!(calls[0].authorization.as_deref(), Some("Bearer test-key"));
        assert_eq!(calls[0].accept.as_deref(), Some("application/json"));
        assert_eq!(calls[0].body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(calls[0].body["messages"][0]["content"], "prompt");
        Ok(())
    }

    #[tokio::test]
    async fn invokes_completion_model() -> anyhow::Result<()> {
        let (client, calls) = spawn_stub().await?;

        let text = client
            .invoke("meta.llama3-70b-instruct-v1:0", "prompt")
            .await?;
        assert_eq!(text, "```java\nclass A {}\n```");

        let calls = calls.lock().unwrap().clone();
        assert_eq!(calls[0].body["prompt"], "prompt");
        assert_eq!(calls[0].body["max_gen_len"], 800);
        Ok(())
    }

    #[tokio::test]
    async fn unsupported_model_sends_nothing() -> anyhow::Result<()> {
        let (client, calls) = spawn_stub().await?;

        let error = client.invoke("cohere.command-r", "prompt").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedModel);
        assert!(calls.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_external() -> anyhow::Result<()> {
        let (client, _calls) = spawn_stub().await?;

        let error = client
            .invoke("anthropic.claude-denied", "prompt")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.to_string().contains("403"));
        Ok(())
    }

    #[tokio::test]
    async fn connection_failure_is_network() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client =
            BedrockClient::new(BedrockConfig::default().with_endpoint(format!("http://{addr}")))?;
        let error = client
            .invoke("meta.llama3-70b-instruct-v1:0", "prompt")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(std::error::Error::source(&error).is_some());
        Ok(())
    }
}
