use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-gateway")]
#[command(about = "Rate-limited chat proxy for the website chat widget")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Anthropic API base URL (overridable so tests can point at a mock server)
    #[arg(long, default_value = "https://api.anthropic.com")]
    pub anthropic_url: String,

    // Model identifier sent with every completion
    #[arg(short, long, default_value = "claude-3-5-haiku-latest")]
    pub model: String,

    // Output token ceiling per completion
    #[arg(long, default_value_t = 1024)]
    pub max_tokens: u32,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Max tracked clients before expired windows get swept
    #[arg(long, default_value_t = 10_000)]
    pub max_clients: usize,
}
