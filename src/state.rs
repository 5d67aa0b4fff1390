use std::time::Duration;

use crate::anthropic::AnthropicClient;
use crate::config::Args;
use crate::rate_limit::RateLimiter;

// app's shared state - built once at startup, lives for the whole process
pub struct AppState {
    pub upstream: AnthropicClient,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(args: &Args, api_key: String) -> Self {
        Self {
            upstream: AnthropicClient::new(
                reqwest::Client::new(),
                args.anthropic_url.clone(),
                api_key,
                args.model.clone(),
                args.max_tokens,
            ),
            rate_limiter: RateLimiter::new(
                args.rate_limit,
                Duration::from_secs(args.rate_window),
                args.max_clients,
            ),
        }
    }
}
