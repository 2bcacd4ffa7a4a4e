//! # Tipsplit Entry Point
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (stderr)
//! 3. Load config (file, then `TIPSPLIT_*` overrides)
//! 4. Spawn the calculation service
//! 5. Read commands from stdin until `quit` or end of input
//!
//! ```text
//! $ tipsplit
//! Total bill $0.00 | Total tip $0.00 | Per person $0.00
//! bill 84
//! Total bill $84.00 | Total tip $0.00 | Per person $84.00
//! tip 15
//! Total bill $84.00 | Total tip $12.60 | Per person $96.60
//! split +
//! Total bill $84.00 | Total tip $12.60 | Per person $48.30
//! ```

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = tipsplit_cli::Cli::parse();

    match tipsplit_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tipsplit: {e}");
            ExitCode::FAILURE
        }
    }
}
