//! Generate a mock cycling workout dataset for development and testing

use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use workout_metrics::config::DEFAULT_DATA_FILE;
use workout_metrics::db;
use workout_metrics::mock_data::{
  generate_mock_workouts, MockDataOptions, MockDataSummary, DEFAULT_SEED, DEFAULT_SPAN_DAYS,
  DEFAULT_WORKOUT_COUNT,
};

#[derive(Parser)]
#[command(name = "generate_mock_data", version, about = "Generate mock cycling workouts")]
struct Cli {
  /// Number of workouts to generate
  #[arg(long, default_value_t = DEFAULT_WORKOUT_COUNT)]
  count: usize,

  /// Length of the training plan in days
  #[arg(long, default_value_t = DEFAULT_SPAN_DAYS)]
  days: usize,

  /// Last day of the plan (YYYY-MM-DD), defaults to today
  #[arg(long)]
  end_date: Option<NaiveDate>,

  #[arg(long, default_value_t = DEFAULT_SEED)]
  seed: u64,

  /// JSON file to write
  #[arg(long, default_value = DEFAULT_DATA_FILE)]
  output: PathBuf,

  /// Also insert the workouts into this SQLite database
  #[arg(long)]
  database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  workout_metrics::init_tracing();
  let cli = Cli::parse();

  let options = MockDataOptions {
    count: cli.count,
    span_days: cli.days,
    end_date: cli.end_date.unwrap_or_else(|| Utc::now().date_naive()),
    seed: cli.seed,
  };

  info!("Generating {} mock cycling workouts", options.count);
  let workouts = generate_mock_workouts(&options)?;

  if let Some(parent) = cli.output.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&cli.output, serde_json::to_string_pretty(&workouts)?)?;
  info!("Data saved to {}", cli.output.display());

  if let Some(url) = &cli.database_url {
    let pool = db::initialize_db(url).await?;
    for workout in &workouts {
      db::insert_workout(&pool, workout).await?;
    }
    pool.close().await;
    info!("Inserted {} workouts into {}", workouts.len(), url);
  }

  let summary = MockDataSummary::compute(&workouts);
  for (workout_type, count) in &summary.type_counts {
    info!("  - {}: {}", workout_type, count);
  }
  info!("Average TSS: {:.1}", summary.average_tss);
  if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
    info!("Date range: {} to {}", first, last);
  }

  Ok(())
}
