//! A simple program demonstrates how to use the OpenRouter provider: the
//! same conversation is sent to a few models, then a couple of texts are
//! embedded.

#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use llm_relay_model::{
    EmbedRequest, GenerateRequest, LlmProvider, Message, ProviderError,
};
use llm_relay_openrouter_model::{API_KEY_ENV, OpenRouterProvider};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

const MODELS: &[&str] = &[
    "openai/gpt-3.5-turbo",
    "anthropic/claude-3-haiku",
    "mistral/mistral-7b",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let provider = match OpenRouterProvider::from_env() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Set {API_KEY_ENV} to run this demo.");
            return ExitCode::FAILURE;
        }
    };
    debug!("using {:?}", provider.config());

    let messages = [
        Message::system(
            "You are a helpful AI assistant specialized in understanding \
             complex systems.",
        ),
        Message::user(
            "What are the key advantages of swarm intelligence algorithms?",
        ),
    ];

    for model in MODELS {
        println!("{}", format!("== {model} ==").bright_white().bold());
        let req = GenerateRequest::new(messages.clone()).with_model(*model);
        match provider.generate(req).await {
            Ok(resp) => {
                println!("{}🤖 {}", BAR_CHAR.bright_cyan(), resp.content);
                println!(
                    "{}model: {}, tokens: {} prompt + {} completion = {}",
                    BAR_CHAR.bright_black(),
                    resp.model,
                    resp.usage.prompt_tokens,
                    resp.usage.completion_tokens,
                    resp.usage.total_tokens,
                );
            }
            Err(err) => {
                println!(
                    "{}⚠️  {} ({})",
                    BAR_CHAR.bright_yellow(),
                    err,
                    err.kind()
                );
            }
        }
        println!();
    }

    let texts = [
        "Swarm intelligence uses multiple agents to solve complex problems.",
        "Neural networks are inspired by the human brain.",
    ];
    match provider.embed(EmbedRequest::new(texts)).await {
        Ok(embeddings) => {
            println!("Generated {} embeddings.", embeddings.len());
            if let Some(first) = embeddings.first() {
                let head = &first[..first.len().min(5)];
                println!("First embedding: {} dims, starts {head:?}", first.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("embedding failed: {err}");
            ExitCode::FAILURE
        }
    }
}
