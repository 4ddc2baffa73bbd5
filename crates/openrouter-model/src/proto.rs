use llm_relay_model::{
    EmbedRequest, ExtraOptions, GenerateRequest, Message, normalize_messages,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, OpenRouterConfig};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatCompletion {
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    pub usage: Option<llm_relay_model::Usage>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
    pub function_call: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmbeddingList {
    pub data: Vec<EmbeddingItem>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmbeddingItem {
    pub embedding: Vec<f64>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<Value>>,
}

impl ChatCompletionRequest {
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

// -----------
// Conversions
// -----------

/// Builds the chat-completion body for `req`.
///
/// Records are coerced first, so a bad one fails before anything is sent.
pub fn create_request(
    req: GenerateRequest,
    config: &OpenRouterConfig,
) -> Result<(ChatCompletionRequest, ExtraOptions), Error> {
    let messages = normalize_messages(req.messages)?;
    let chat_req = ChatCompletionRequest {
        model: req.model.unwrap_or_else(|| config.model.clone()),
        messages,
        temperature: req.temperature,
        // Zero and empty are treated as unset.
        max_tokens: req.max_tokens.filter(|n| *n > 0),
        functions: req.functions.filter(|f| !f.is_empty()),
    };
    Ok((chat_req, req.extra))
}

#[inline]
pub fn create_embedding_request<'a>(
    model: &'a str,
    input: &'a [String],
) -> EmbeddingRequest<'a> {
    EmbeddingRequest { model, input }
}

/// Serializes `body` and merges `extra` on top of it. Keys in `extra` win.
pub fn merge_extra<T: Serialize>(
    body: &T,
    extra: &ExtraOptions,
) -> Result<Value, Error> {
    let mut value = serde_json::to_value(body)?;
    let Value::Object(fields) = &mut value else {
        return Err(Error::InvalidRequest(
            "request body is not a JSON object".to_owned(),
        ));
    };
    for (key, extra_value) in extra {
        fields.insert(key.clone(), extra_value.clone());
    }
    Ok(value)
}

/// Checks the batch size and splits the texts into consecutive chunks.
pub fn batches(
    req: &EmbedRequest,
) -> Result<std::slice::Chunks<'_, String>, Error> {
    if req.batch_size == 0 {
        return Err(Error::InvalidRequest(
            "batch size must be greater than zero".to_owned(),
        ));
    }
    Ok(req.texts.chunks(req.batch_size))
}
