//! Marginalia server binary
//!
//! Starts the HTTP server for the AI assist and note routes.

use marginalia_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: marginalia-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig {
            database_path: "marginalia.db".to_string(),
            ..ServerConfig::default_test_config()
        }
    };

    start_server(config).await
}

fn print_help() {
    println!("Marginalia Server - AI-assisted notes over HTTP");
    println!();
    println!("USAGE:");
    println!("    marginalia-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     API key for the inference endpoint (required)");
    println!("    OPENAI_BASE_URL    OpenAI-compatible base URL");
    println!("    MARGINALIA_MODEL   Default model");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    - bind_address, bind_port: where to listen");
    println!("    - database_path: SQLite file (default: marginalia.db)");
    println!("    - [assist]: max_input_chars, max_search_candidates,");
    println!("      enforce_candidate_membership");
    println!("    - [inference]: base_url, default_model, timeout_secs, [inference.models]");
    println!();
}
