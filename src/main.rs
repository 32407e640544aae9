//! vision-probe: try a prompt/image pair against a local Ollama server.
//!
//! Usage:
//!   vision-probe <image_path>
//!
//! Reads `config.json` and `prompt.txt` from the executable's directory
//! (or `VISION_PROBE_CONFIG_DIR`). Set `RUST_LOG=debug` for request details.
use tracing_subscriber::EnvFilter;
use vision_probe::config::default_config_dir;
use vision_probe::prelude::*;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_dir = default_config_dir();
    let mut stdout = std::io::stdout();

    if let Err(e) = run(&args, &config_dir, &mut stdout).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
