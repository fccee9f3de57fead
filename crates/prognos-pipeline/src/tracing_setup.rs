//! Tracing initialization.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prognos_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `PROGNOS_LOG` overrides the configured level with per-crate directives,
/// e.g. `PROGNOS_LOG=prognos_ranking=debug,prognos_storage=warn`.
/// Idempotent: only the first call has an effect.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        install(config);
    });
}

/// Try to set the global subscriber. Returns false when one is already set,
/// in which case that subscriber stays in place.
fn install(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env("PROGNOS_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer().with_target(true).with_thread_ids(true);
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json_logs {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    match installed {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "global subscriber already set, keeping it");
            false
        }
    }
}
