use std::env;
use std::fmt::Debug;

use crate::Error;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";

/// The public OpenRouter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// The chat model used when neither the config nor the request names one.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
/// The embedding model used when neither the config nor the request names
/// one.
pub const DEFAULT_EMBEDDING_MODEL: &str = "openai/text-embedding-ada-002";

const DEFAULT_HTTP_REFERER: &str = "https://github.com/llm-relay/llm-relay";
const DEFAULT_X_TITLE: &str = "llm-relay";

/// Resolves the API key from an explicit value, else from
/// [`API_KEY_ENV`] through `lookup`.
///
/// Empty strings are treated as absent.
pub fn resolve_credential<F>(
    explicit: Option<String>,
    lookup: F,
) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|key| !key.is_empty())
        .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.is_empty()))
        .ok_or(Error::MissingApiKey)
}

/// Resolves the base URL from an explicit value, else from
/// [`BASE_URL_ENV`] through `lookup`, else [`DEFAULT_BASE_URL`].
///
/// A trailing `/` is dropped so paths can be appended directly.
pub fn resolve_base_url<F>(explicit: Option<String>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = explicit
        .filter(|url| !url.is_empty())
        .or_else(|| lookup(BASE_URL_ENV).filter(|url| !url.is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    base_url.trim_end_matches('/').to_owned()
}

/// Builder for [`OpenRouterConfig`].
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct OpenRouterConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    embedding_model: Option<String>,
    http_referer: Option<String>,
    x_title: Option<String>,
}

impl OpenRouterConfigBuilder {
    /// Creates an empty builder. Unset values are resolved on build.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[inline]
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the default chat model.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the default embedding model.
    #[inline]
    pub fn with_embedding_model<S: Into<String>>(mut self, model: S) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    /// Sets the `HTTP-Referer` header, which OpenRouter uses to attribute
    /// traffic to an app.
    #[inline]
    pub fn with_http_referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.http_referer = Some(referer.into());
        self
    }

    /// Sets the `X-Title` header, the app name shown by OpenRouter.
    #[inline]
    pub fn with_x_title<S: Into<String>>(mut self, title: S) -> Self {
        self.x_title = Some(title.into());
        self
    }

    /// Builds the configuration, falling back to the process environment.
    #[inline]
    pub fn build(self) -> Result<OpenRouterConfig, Error> {
        self.build_with(|name| env::var(name).ok())
    }

    /// Builds the configuration, falling back to `lookup` for values that
    /// were not set explicitly.
    ///
    /// Fails with [`Error::MissingApiKey`] when no key can be found.
    pub fn build_with<F>(self, lookup: F) -> Result<OpenRouterConfig, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = resolve_credential(self.api_key, &lookup)?;
        let base_url = resolve_base_url(self.base_url, &lookup);
        Ok(OpenRouterConfig {
            api_key,
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            embedding_model: self
                .embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_owned()),
            http_referer: self
                .http_referer
                .unwrap_or_else(|| DEFAULT_HTTP_REFERER.to_owned()),
            x_title: self.x_title.unwrap_or_else(|| DEFAULT_X_TITLE.to_owned()),
        })
    }
}

impl Debug for OpenRouterConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("http_referer", &self.http_referer)
            .field("x_title", &self.x_title)
            .finish()
    }
}

/// Configuration for [`OpenRouterProvider`](crate::OpenRouterProvider).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpenRouterConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) embedding_model: String,
    pub(crate) http_referer: String,
    pub(crate) x_title: String,
}

impl OpenRouterConfig {
    /// The resolved base URL, without a trailing `/`.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The default chat model.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The default embedding model.
    #[inline]
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    #[inline]
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("http_referer", &self.http_referer)
            .field("x_title", &self.x_title)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_resolve_credential() {
        let from_arg = resolve_credential(
            Some("explicit".to_owned()),
            env_of(&[(API_KEY_ENV, "from-env")]),
        );
        assert_eq!(from_arg.unwrap(), "explicit");

        let from_env =
            resolve_credential(None, env_of(&[(API_KEY_ENV, "from-env")]));
        assert_eq!(from_env.unwrap(), "from-env");

        let empty_arg = resolve_credential(
            Some(String::new()),
            env_of(&[(API_KEY_ENV, "from-env")]),
        );
        assert_eq!(empty_arg.unwrap(), "from-env");
    }

    #[test]
    fn test_missing_credential() {
        let err = OpenRouterConfigBuilder::new()
            .build_with(env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));

        let err = resolve_credential(None, env_of(&[(API_KEY_ENV, "")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(None, env_of(&[])), DEFAULT_BASE_URL);
        assert_eq!(
            resolve_base_url(
                None,
                env_of(&[(BASE_URL_ENV, "http://localhost:8080/v1/")])
            ),
            "http://localhost:8080/v1"
        );
        assert_eq!(
            resolve_base_url(
                Some("http://proxy".to_owned()),
                env_of(&[(BASE_URL_ENV, "http://ignored")])
            ),
            "http://proxy"
        );
    }

    #[test]
    fn test_build_defaults() {
        let config = OpenRouterConfigBuilder::with_api_key("xxx")
            .build_with(env_of(&[]))
            .unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.embedding_model(), DEFAULT_EMBEDDING_MODEL);
        assert_eq!(
            config.endpoint("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let config = OpenRouterConfigBuilder::with_api_key("sk-secret")
            .build_with(env_of(&[]))
            .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));

        let printed =
            format!("{:?}", OpenRouterConfigBuilder::with_api_key("sk-secret"));
        assert!(!printed.contains("sk-secret"));
    }
}
