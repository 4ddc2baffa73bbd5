/// Model identifiers known to work through OpenRouter.
///
/// This is a hand-picked reference list, OpenRouter serves many more. It is
/// not kept in sync with their catalog.
pub const AVAILABLE_MODELS: &[&str] = &[
    // OpenAI
    "openai/gpt-3.5-turbo",
    "openai/gpt-4",
    "openai/gpt-4-turbo",
    // Anthropic
    "anthropic/claude-3-opus",
    "anthropic/claude-3-sonnet",
    "anthropic/claude-3-haiku",
    // Mistral
    "mistral/mistral-7b",
    "mistral/mixtral-8x7b",
    "mistral/mistral-large",
    // Meta
    "meta/llama-3-70b",
    "meta/llama-3-8b",
    // Others
    "google/gemini-pro",
    "google/gemini-ultra",
    "cohere/command-r",
    "cohere/command-r-plus",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MODEL;

    #[test]
    fn test_default_model_is_listed() {
        assert!(AVAILABLE_MODELS.contains(&DEFAULT_MODEL));
        assert!(AVAILABLE_MODELS.contains(&"anthropic/claude-3-haiku"));
    }
}
