use tracing_subscriber::EnvFilter;

/// Build the filter from a `RUST_LOG` value, falling back to the `--debug`
/// default when it is unset or unparsable.
fn filter(debug: bool, rust_log: Option<String>) -> EnvFilter {
    let default = if debug { "warn,animai_studio=debug" } else { "warn" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--debug`; call this
/// after `.env` has been loaded so a `RUST_LOG` set there is honoured.
pub fn init(debug: bool, lookup: impl Fn(&str) -> Option<String>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug, lookup("RUST_LOG")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn dump_exchange(stage: &str, prompt: &str, raw: &str) {
    tracing::debug!(stage, "\n===== PROMPT =====\n{}\n===== RAW RESPONSE =====\n{}\n", prompt, raw);
}
