//! subprocess-kernel: validate worker options and emit a config snapshot.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load options (file given on the command line, else `config/default.toml`)
//!   3. Init logger at the configured level
//!   4. Build the snapshot
//!   5. Print the snapshot as JSON on stdout

use std::env;

use subprocess_kernel::{AppError, SubprocessConfig, logger, options};
use tracing::info;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let config_path = env::args().nth(1);
    let opts = options::load(config_path.as_deref())?;

    // The level comes from the options, so the subscriber starts after loading.
    logger::init(&opts.log_level)?;
    info!(
        config_path = ?config_path,
        log_level = %opts.log_level,
        "options loaded"
    );

    let config = SubprocessConfig::from_options(&opts)?;

    info!(
        source_path = %config.source_path(),
        worker_path = ?config.worker_path(),
        wait_time = ?config.wait_time(),
        concurrency = config.concurrency(),
        only_upload_logs_on_error = ?config.only_upload_logs_on_error(),
        "subprocess config ready"
    );

    println!("{}", config.to_json()?);

    Ok(())
}
