//! Tracing subscriber setup for the host.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber. Idempotent: the first call wins, and a
/// subscriber installed elsewhere is left in place.
pub fn init(default_filter: &str) {
    let default_filter = default_filter.to_string();
    TRACING_INIT.call_once(move || {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&default_filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(true)
            .compact();

        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(DEFAULT_FILTER);
        init("trace");
        tracing::info!("still logging");
    }
}
