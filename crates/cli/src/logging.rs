use llama_launch_config::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

pub fn init(quiet: bool) {
    let fallback = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));
    // stdout is reserved for `--dry-run` output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
