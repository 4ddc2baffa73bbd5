use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An embedding vector.
pub type Embedding = Vec<f64>;

/// Token accounting reported by the upstream service.
///
/// Counts the upstream leaves out are zero, so this is always present on a
/// [`Response`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens generated by the model.
    #[serde(default)]
    pub completion_tokens: u64,
    /// Sum reported by the upstream. It is not recomputed locally.
    #[serde(default)]
    pub total_tokens: u64,
}

/// A normalized chat-completion response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Text of the first choice.
    pub content: String,
    /// The model that actually served the request, as reported upstream.
    pub model: String,
    /// Name of the provider that produced this response.
    pub provider: String,
    /// Token usage.
    pub usage: Usage,
    /// Why generation stopped, e.g. `stop` or `length`.
    pub finish_reason: Option<String>,
    /// A function call requested by the model.
    pub function_call: Option<Value>,
    /// The untouched upstream payload, kept for debugging.
    pub raw_response: Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_usage_defaults_missing_counts() {
        let usage: Usage =
            serde_json::from_value(json!({ "prompt_tokens": 7 })).unwrap();
        assert_eq!(
            usage,
            Usage {
                prompt_tokens: 7,
                completion_tokens: 0,
                total_tokens: 0,
            }
        );
    }
}
