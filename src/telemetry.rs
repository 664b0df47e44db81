//! Telemetry helpers for applications embedding `chart-separators`.
//!
//! Separator transitions log under `trace`, reconciliation passes and stale
//! render tasks under `debug`. Hosts either call one of the helpers below or
//! wire their own `tracing` subscriber.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_DIRECTIVES: &str = "info,chart_separators=debug";

/// Initializes a `tracing` subscriber honoring `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_DIRECTIVES`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_DIRECTIVES));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Initializes a `tracing` subscriber with explicit filter directives,
/// e.g. `"chart_separators::separator=trace"` to follow every placement.
#[must_use]
pub fn init_tracing_with_directives(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return install(tracing_subscriber::EnvFilter::new(directives));
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
