use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::rolling_average;
use league_metrics::util::{format_average, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::TrendArgs;
use crate::commands::context::LeagueContext;

#[derive(Debug, Serialize)]
struct DriverTrend {
    driver: String,
    team: String,
    smoothed: Vec<Option<f64>>,
}

pub fn run(args: TrendArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;
    let smoothing = args.smoothing.unwrap_or(context.config.trend_window);

    let trends: Vec<DriverTrend> = metrics
        .drivers_by_points()
        .into_iter()
        .take(args.top)
        .map(|stats| DriverTrend {
            driver: stats.name.clone(),
            team: stats.team.clone(),
            smoothed: rolling_average(&stats.positions, smoothing),
        })
        .collect();
    info!(drivers = trends.len(), smoothing, "trend computed");

    if context.json {
        return write_json_stdout(&trends);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if trends.is_empty() {
        writeln!(output, "No race results to display yet.")?;
    }
    for trend in &trends {
        let values: Vec<String> = trend
            .smoothed
            .iter()
            .map(|value| format_average(*value))
            .collect();
        writeln!(output, "{}\t{}", trend.driver, values.join("\t"))?;
    }
    output.flush()?;
    Ok(())
}
