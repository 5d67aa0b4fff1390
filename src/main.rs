use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use chat_gateway::AppState;
use chat_gateway::config::Args;
use chat_gateway::handlers::create_router;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();

    // the upstream credential only ever comes from the environment
    let api_key = match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            tracing::error!("ANTHROPIC_API_KEY is not set, refusing to start");
            std::process::exit(1);
        }
    };

    // creating shared state
    let state = Arc::new(AppState::new(&args, api_key));

    let app = create_router().with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Chat gateway running on http://localhost:{}", args.port);
    tracing::info!("Forwarding to {} (model {})", args.anthropic_url, args.model);
    tracing::info!(
        "Rate limit: {} requests per {} seconds, up to {} tracked clients",
        args.rate_limit,
        args.rate_window,
        args.max_clients
    );
    axum::serve(listener, app).await.unwrap();
}
