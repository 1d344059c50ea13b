use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// `warn` globally, `level` for each crate in `crates`.
pub fn default_filter(crates: &[&str], level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(crates.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn env_filter(crates: &[&str]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(crates, "info")))
}

/// Initialize tracing subscriber with compact output on stdout.
/// - Respects `RUST_LOG` if set
/// - Otherwise logs `crates` at `info` and everything else at `warn`
pub fn init_logging_default(crates: &[&str]) {
    let _ = fmt()
        .with_env_filter(env_filter(crates))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Same filter rules as [`init_logging_default`]
/// - Emits structured JSON logs for better machine parsing
pub fn init_logging_json(crates: &[&str]) {
    // 存储层细节可通过 RUST_LOG=service=debug 打开
    let _ = fmt()
        .with_env_filter(env_filter(crates))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
