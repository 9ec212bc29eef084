use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "profile_form=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`
/// (default `profile_form=info`).
///
/// Safe to call more than once. Does nothing if the host already installed
/// a subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
