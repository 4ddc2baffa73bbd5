use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use llm_relay_model::{
    EmbedRequest, Embedding, ErrorKind, GenerateRequest, LlmProvider,
    Message, MessageError, ProviderError, Response, Usage, normalize_messages,
};
use serde_json::{Value, json};

#[derive(Debug)]
enum EchoProviderError {
    Message(MessageError),
    ZeroBatch,
}

impl Display for EchoProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for EchoProviderError {}

impl ProviderError for EchoProviderError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}

/// Echoes the last message back and "embeds" a text as its length.
struct EchoProvider;

impl LlmProvider for EchoProvider {
    type Error = EchoProviderError;

    fn generate(
        &self,
        req: GenerateRequest,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send + 'static
    {
        let model = req.model.unwrap_or_else(|| self.default_model().to_owned());
        let result = normalize_messages(req.messages)
            .map_err(EchoProviderError::Message)
            .map(|messages| {
                let content = messages
                    .last()
                    .map(|msg| msg.content.clone())
                    .unwrap_or_default();
                Response {
                    content: format!("You said {content}"),
                    model,
                    provider: "echo".to_owned(),
                    usage: Usage::default(),
                    finish_reason: Some("stop".to_owned()),
                    function_call: None,
                    raw_response: Value::Null,
                }
            });
        ready(result)
    }

    fn embed(
        &self,
        req: EmbedRequest,
    ) -> impl Future<Output = Result<Vec<Embedding>, Self::Error>> + Send + 'static
    {
        let result = if req.batch_size == 0 {
            Err(EchoProviderError::ZeroBatch)
        } else {
            Ok(req
                .texts
                .iter()
                .map(|text| vec![text.len() as f64])
                .collect())
        };
        ready(result)
    }

    fn default_model(&self) -> &str {
        "echo-1"
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["echo-1"]
    }
}

async fn ask<P: LlmProvider>(
    provider: &P,
    question: &str,
) -> Result<String, P::Error> {
    let req = GenerateRequest::new([
        Message::system("You are a parrot."),
        Message::user(question),
    ]);
    Ok(provider.generate(req).await?.content)
}

#[tokio::test]
async fn test_generate_through_trait() {
    let provider = EchoProvider;
    let answer = ask(&provider, "Good morning").await.unwrap();
    assert_eq!(answer, "You said Good morning");

    let resp = provider
        .generate(GenerateRequest::new([Message::user("hi")]).with_model("echo-2"))
        .await
        .unwrap();
    assert_eq!(resp.model, "echo-2");
    assert_eq!(resp.provider, provider.provider_name());
}

#[tokio::test]
async fn test_record_is_coerced() {
    let Value::Object(record) = json!({ "role": "user", "content": "Hi there" })
    else {
        unreachable!()
    };
    let resp = EchoProvider
        .generate(GenerateRequest::new([record]))
        .await
        .unwrap();
    assert_eq!(resp.content, "You said Hi there");
}

#[tokio::test]
async fn test_error() {
    let Value::Object(record) = json!({ "content": "no role" }) else {
        unreachable!()
    };
    let err = EchoProvider
        .generate(GenerateRequest::new([record]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);

    let err = EchoProvider
        .embed(EmbedRequest::new(["a"]).with_batch_size(0))
        .await
        .unwrap_err();
    assert!(matches!(err, EchoProviderError::ZeroBatch));
}

#[tokio::test]
async fn test_embed_keeps_order() {
    let embeddings = EchoProvider
        .embed(EmbedRequest::new(["a", "abc", "ab"]))
        .await
        .unwrap();
    assert_eq!(embeddings, vec![vec![1.0], vec![3.0], vec![2.0]]);
}
