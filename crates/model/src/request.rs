use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MessageError;

/// Extra fields merged verbatim into the outgoing request body.
///
/// They are applied last, so a key here overrides any field of the same
/// name that the provider would otherwise send.
pub type ExtraOptions = Map<String, Value>;

/// The default sampling temperature for [`GenerateRequest`].
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// The default number of texts sent per embedding request.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 16;

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system instructions.
    System,
    /// The user input.
    User,
    /// The model output.
    Assistant,
    /// The result of a function call.
    Function,
}

/// A complete, role-tagged message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Who wrote this message.
    pub role: Role,
    /// The text of the message.
    pub content: String,
    /// An optional author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A function call payload attached to the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
}

impl Message {
    /// Creates a message with the given role and content.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a function result message.
    #[inline]
    pub fn function<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Function, content)
    }

    /// Sets the author name.
    #[inline]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a function call payload.
    #[inline]
    pub fn with_function_call(mut self, function_call: Value) -> Self {
        self.function_call = Some(function_call);
        self
    }
}

/// A message as handed in by the caller.
///
/// Callers may pass either a constructed [`Message`] or a loosely-typed
/// key/value record. Records are coerced into a `Message` before anything
/// gets serialized; see [`normalize_messages`].
#[derive(Clone, Debug, PartialEq)]
pub enum MessageInput {
    /// An already constructed message.
    Message(Message),
    /// A raw record with `role`, `content` and optionally `name` and
    /// `function_call` keys.
    Record(Map<String, Value>),
}

impl From<Message> for MessageInput {
    #[inline]
    fn from(message: Message) -> Self {
        MessageInput::Message(message)
    }
}

impl From<Map<String, Value>> for MessageInput {
    #[inline]
    fn from(record: Map<String, Value>) -> Self {
        MessageInput::Record(record)
    }
}

impl TryFrom<MessageInput> for Message {
    type Error = serde_json::Error;

    fn try_from(input: MessageInput) -> Result<Self, Self::Error> {
        match input {
            MessageInput::Message(message) => Ok(message),
            MessageInput::Record(record) => {
                serde_json::from_value(Value::Object(record))
            }
        }
    }
}

/// Coerces every input into a canonical [`Message`], keeping the order.
///
/// Fails on the first record that misses `role` or `content`, carries an
/// unknown key, or has a value of the wrong type.
pub fn normalize_messages<I>(inputs: I) -> Result<Vec<Message>, MessageError>
where
    I: IntoIterator<Item = MessageInput>,
{
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            Message::try_from(input).map_err(|err| MessageError::new(index, err))
        })
        .collect()
}

/// A chat-completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    /// The input messages.
    pub messages: Vec<MessageInput>,
    /// The model to use. Providers fall back to their default model.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
    /// Function definitions the model may call.
    pub functions: Option<Vec<Value>>,
    /// Provider-specific fields merged into the body last.
    pub extra: ExtraOptions,
}

impl GenerateRequest {
    /// Creates a request with the given messages and default settings.
    pub fn new<I, M>(messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MessageInput>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            functions: None,
            extra: ExtraOptions::new(),
        }
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[inline]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the function definitions.
    #[inline]
    pub fn with_functions(mut self, functions: Vec<Value>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Adds an extra body field. A later call with the same key wins.
    #[inline]
    pub fn with_extra<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// An embedding request.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbedRequest {
    /// Texts to embed, one vector is returned per text.
    pub texts: Vec<String>,
    /// The model to use. Providers fall back to their embedding model.
    pub model: Option<String>,
    /// Number of texts sent per request.
    pub batch_size: usize,
    /// Provider-specific fields merged into every batch body last.
    pub extra: ExtraOptions,
}

impl EmbedRequest {
    /// Creates a request for the given texts with default settings.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            model: None,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
            extra: ExtraOptions::new(),
        }
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the batch size.
    #[inline]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Adds an extra body field. A later call with the same key wins.
    #[inline]
    pub fn with_extra<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
