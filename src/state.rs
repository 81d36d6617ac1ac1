use serde_json::Value;
use tracing::{debug, warn};

use crate::commands::find_tool;
use crate::config::Config;
use crate::error::{WorkoutError, WorkoutResult};
use crate::loader::WorkoutLoader;

/// Application state handed to the host's tool dispatcher
pub struct AppState {
  pub loader: WorkoutLoader,
}

impl AppState {
  pub fn new(loader: WorkoutLoader) -> Self {
    Self { loader }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(WorkoutLoader::new(config.source.clone()))
  }

  /// Validate arguments, load the dataset on first use, then run the tool
  pub async fn invoke(&self, name: &str, args: Value) -> WorkoutResult<Value> {
    let tool = find_tool(name)
      .ok_or_else(|| WorkoutError::InvalidInput(format!("Unknown tool: {}", name)))?;

    let result: WorkoutResult<Value> = async {
      let call = (tool.handler)(args)?;
      let store = self.loader.load().await?;
      call(store.as_ref())
    }
    .await;

    match &result {
      Ok(_) => debug!("Tool {} completed", name),
      Err(e) => warn!("Tool {} failed ({}): {}", name, e.kind(), e),
    }

    result
  }
}
