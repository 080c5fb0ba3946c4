//! Process-wide `tracing` setup. Every other crate only calls
//! `tracing::{debug,info,warn,error}!`; this crate is the one place that
//! decides where those events go.

use tracing_subscriber::EnvFilter;

/// Keeps the chrome trace writer alive; drop it to flush the trace file to
/// disk. A no-op handle when the `trace-chrome` feature is off.
#[must_use]
pub struct TracingGuard {
  #[cfg(feature = "trace-chrome")]
  _chrome_guard: Option<tracing_chrome::FlushGuard>,
}

/// Installs the global subscriber. `filter` is an `EnvFilter` directive
/// string (e.g. `"purs_bundle_core=debug,info"`); an invalid directive
/// falls back to `"info"` rather than panicking.
pub fn init_tracing(filter: &str) -> TracingGuard {
  let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

  #[cfg(feature = "trace-chrome")]
  {
    use tracing_subscriber::prelude::*;

    let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
    tracing_subscriber::registry()
      .with(env_filter)
      .with(tracing_subscriber::fmt::layer())
      .with(chrome_layer)
      .init();
    TracingGuard { _chrome_guard: Some(guard) }
  }

  #[cfg(not(feature = "trace-chrome"))]
  {
    tracing_subscriber::fmt().with_env_filter(env_filter).with_ansi(true).init();
    TracingGuard {}
  }
}
