use llm_relay_model::{Embedding, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::proto::{ChatCompletion, EmbeddingList};
use crate::{Error, PROVIDER_NAME};

/// Turns a chat-completion payload into a [`Response`].
///
/// Only the first choice is read. The upstream `model` is echoed back,
/// falling back to `requested_model` when the payload has none. Missing
/// usage counts are zero.
pub fn normalize_chat(
    raw: Value,
    requested_model: &str,
) -> Result<Response, Error> {
    let completion = ChatCompletion::deserialize(&raw)?;
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(Error::MalformedResponse(
            "response has no choices".to_owned(),
        ));
    };

    Ok(Response {
        // A choice carrying only a function call may have a null content.
        content: choice.message.content.unwrap_or_default(),
        model: completion
            .model
            .unwrap_or_else(|| requested_model.to_owned()),
        provider: PROVIDER_NAME.to_owned(),
        usage: completion.usage.unwrap_or_default(),
        finish_reason: choice.finish_reason,
        function_call: choice.message.function_call,
        raw_response: raw,
    })
}

/// Reads `data[i].embedding` from an embeddings payload, in upstream order.
pub fn collect_embeddings(raw: Value) -> Result<Vec<Embedding>, Error> {
    let list: EmbeddingList = serde_json::from_value(raw)?;
    Ok(list.data.into_iter().map(|item| item.embedding).collect())
}
