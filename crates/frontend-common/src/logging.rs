//! Tracing setup
//!
//! Natively this defers to [`clinic_core::tracing::init_tracing`]; in the
//! browser, events go to the developer console through `tracing-web`.

#[cfg(not(target_arch = "wasm32"))]
pub use clinic_core::tracing::init_tracing;

#[cfg(target_arch = "wasm32")]
pub fn init_tracing(default_filter: &str) -> clinic_core::CoreResult<()> {
    use clinic_core::CoreError;
    use tracing_subscriber::fmt::format::Pretty;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
    use tracing_web::{MakeWebConsoleWriter, performance_layer};

    let env_filter = EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // Browsers have no ANSI support and no std::time clock
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(perf_layer)
        .try_init()
        .map_err(|e| CoreError::invalid_config(format!("tracing already initialized: {e}")))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::init_tracing;

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init_tracing("clinic=debug");
        assert!(init_tracing("clinic=debug").is_err());
    }
}
