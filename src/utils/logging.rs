use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use std::env;

/// Initialize logging for the demo binary and tools.
pub fn init_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Create environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&log_level);

        // Add filters for our application
        filter = filter.add_directive("sceneforge=debug".parse().unwrap());

        filter
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // try_init so tests that race on the global subscriber don't panic
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
