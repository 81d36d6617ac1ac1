//! Cycling workout analytics exposed as host-callable tools
//!
//! A read-only workout store plus a fitness engine computing CTL, ATL and TSB
//! from session TSS. `AppState::invoke` is the single entry point a tool host
//! calls; `commands::TOOLS` lists what it can call.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod fitness;
pub mod loader;
pub mod mock_data;
pub mod models;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use error::{WorkoutError, WorkoutResult};
pub use fitness::FitnessEngine;
pub use loader::WorkoutLoader;
pub use models::{LoadResult, MetricResult, WorkoutRecord};
pub use state::AppState;
pub use store::{SortOrder, WorkoutStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber. Honors `RUST_LOG`, defaults to `info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
  let _ = tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .try_init();
}
