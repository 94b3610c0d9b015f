//! DungeonGPT entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Build the LLM provider
//!   5. Run the console UI over stdin/stdout

use std::io;

use tracing::info;

use dungeongpt::{config, error::AppError, llm::LlmProvider, logger, ui::App};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        data_dir = %config.data_dir.display(),
        provider = %config.llm.provider,
        log_level = %config.log_level,
        "config loaded"
    );

    let provider = LlmProvider::from_config(&config)?;
    let app = App::new(config, provider);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(&mut stdin.lock(), &mut stdout.lock())
}
