use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{EmbedRequest, GenerateRequest};
use crate::response::{Embedding, Response};

/// The error type for a provider.
pub trait ProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a remote LLM provider, which knows how to turn
/// the uniform request types into calls against one upstream service and
/// how to normalize what comes back.
///
/// Once the provider is created, it should behave like a stateless object:
/// its configuration is fixed and concurrent calls must not affect each
/// other. Every returned future owns what it needs, so it can be spawned
/// or dropped at any point.
pub trait LlmProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ProviderError;

    /// Sends a chat-completion request and normalizes the response.
    fn generate(
        &self,
        req: GenerateRequest,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send + 'static;

    /// Embeds every text of the request, returning one vector per text in
    /// input order.
    ///
    /// Implementations may split the texts into several upstream calls,
    /// but a failure on any of them fails the whole operation.
    fn embed(
        &self,
        req: EmbedRequest,
    ) -> impl Future<Output = Result<Vec<Embedding>, Self::Error>> + Send + 'static;

    /// The model used when a request doesn't name one.
    fn default_model(&self) -> &str;

    /// A constant tag identifying this provider.
    fn provider_name(&self) -> &'static str;

    /// Model identifiers known to work with this provider.
    ///
    /// This is a static reference list, not a live catalog query.
    fn available_models(&self) -> &'static [&'static str];
}
