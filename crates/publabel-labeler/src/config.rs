/// Connection settings for the completion service.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Chat completions endpoint.
    pub endpoint: String,
    /// API key, sent as a bearer token.
    pub api_key: String,
    /// Network timeout per request in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            timeout_secs: 45,
        }
    }
}
