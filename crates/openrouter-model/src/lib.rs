//! A model provider for [OpenRouter](https://openrouter.ai), which proxies
//! chat completions and embeddings to many underlying model vendors
//! behind one OpenAI-style API.

#[macro_use]
extern crate tracing;

mod config;
mod models;
mod proto;
pub mod response;

use std::sync::Arc;

use llm_relay_model::{
    EmbedRequest, Embedding, ErrorKind, GenerateRequest, LlmProvider,
    MessageError, ProviderError, Response,
};
use reqwest::{Client, header};
use serde::Serialize;
use serde_json::Value;

pub use config::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_MODEL, OpenRouterConfig, OpenRouterConfigBuilder,
    resolve_base_url, resolve_credential,
};
pub use models::AVAILABLE_MODELS;

/// The provider tag put on every [`Response`].
pub const PROVIDER_NAME: &str = "openrouter";

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const EMBEDDINGS_PATH: &str = "/embeddings";

/// Error type for [`OpenRouterProvider`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was given and none was found in the environment.
    #[error("OpenRouter API key is required (pass one or set {})", API_KEY_ENV)]
    MissingApiKey,
    /// The service answered with a non-success status.
    #[error("OpenRouter API returned error: {status} - {body}")]
    Upstream {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },
    /// The request could not be sent or its response not read.
    #[error("request to OpenRouter failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A message record could not be coerced.
    #[error(transparent)]
    Message(#[from] MessageError),
    /// The request is invalid before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A body could not be encoded or decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The response parsed but lacks required data.
    #[error("malformed OpenRouter response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Returns the HTTP status for upstream errors.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ProviderError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingApiKey => ErrorKind::Configuration,
            Error::Upstream { .. } => ErrorKind::Upstream,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Message(_) | Error::InvalidRequest(_) => {
                ErrorKind::Structural
            }
            Error::Json(_) | Error::MalformedResponse(_) => {
                ErrorKind::MalformedResponse
            }
        }
    }
}

/// OpenRouter model provider.
///
/// Cloning is cheap; clones share the connection pool and configuration.
#[derive(Clone, Debug)]
pub struct OpenRouterProvider {
    client: Client,
    config: Arc<OpenRouterConfig>,
}

impl OpenRouterProvider {
    /// Creates a new `OpenRouterProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Creates a provider configured entirely from the environment.
    #[inline]
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(OpenRouterConfigBuilder::new().build()?))
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }
}

impl LlmProvider for OpenRouterProvider {
    type Error = Error;

    fn generate(
        &self,
        req: GenerateRequest,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send + 'static
    {
        let chat_req = proto::create_request(req, &self.config);
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let (chat_req, extra) = chat_req?;
            let body = proto::merge_extra(&chat_req, &extra)?;
            // `extra` may have replaced the model, so read it from the body.
            let model = body["model"]
                .as_str()
                .unwrap_or(chat_req.model())
                .to_owned();
            debug!(
                "sending chat completion: model={}, messages={}",
                model,
                body["messages"].as_array().map_or(0, Vec::len)
            );
            let raw =
                post_json(&client, &config, CHAT_COMPLETIONS_PATH, &body).await?;
            response::normalize_chat(raw, &model)
        }
    }

    fn embed(
        &self,
        req: EmbedRequest,
    ) -> impl Future<Output = Result<Vec<Embedding>, Self::Error>> + Send + 'static
    {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let model = req
                .model
                .as_deref()
                .unwrap_or(config.embedding_model.as_str())
                .to_owned();
            let mut embeddings = Vec::with_capacity(req.texts.len());
            // Batches go out one at a time so the output order is the input
            // order.
            for (idx, batch) in proto::batches(&req)?.enumerate() {
                trace!("sending embedding batch {idx} of {} texts", batch.len());
                let body = proto::merge_extra(
                    &proto::create_embedding_request(&model, batch),
                    &req.extra,
                )?;
                let raw =
                    post_json(&client, &config, EMBEDDINGS_PATH, &body).await?;
                embeddings.extend(response::collect_embeddings(raw)?);
            }
            Ok(embeddings)
        }
    }

    #[inline]
    fn default_model(&self) -> &str {
        &self.config.model
    }

    #[inline]
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[inline]
    fn available_models(&self) -> &'static [&'static str] {
        AVAILABLE_MODELS
    }
}

/// POSTs `body` to `path` and returns the parsed JSON of a successful
/// response.
///
/// The response is consumed fully on every path, so the connection goes
/// back to the pool before this returns.
async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    config: &OpenRouterConfig,
    path: &str,
    body: &T,
) -> Result<Value, Error> {
    let resp = client
        .post(config.endpoint(path))
        .header(header::AUTHORIZATION, format!("Bearer {}", config.api_key))
        .header(header::CONTENT_TYPE, "application/json")
        .header("HTTP-Referer", &config.http_referer)
        .header("X-Title", &config.x_title)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(Error::Upstream {
            status: status.as_u16(),
            body: text,
        });
    }
    trace!("got response from {path}: {text}");
    Ok(serde_json::from_str(&text)?)
}
