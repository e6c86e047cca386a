use std::io::{self, Write};

use anyhow::Result;
use league_metrics::model::Driver;
use league_metrics::standings::{
    LeagueInsights, PodiumRate, SeasonProgress, league_insights, podium_rates, season_progress,
};
use league_metrics::util::{format_points, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::InsightsArgs;
use crate::commands::context::LeagueContext;

const PODIUM_RATE_ROWS: usize = 8;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightsReport {
    #[serde(flatten)]
    insights: LeagueInsights,
    progress: SeasonProgress,
    podium_rates: Vec<PodiumRate>,
}

pub fn run(args: InsightsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let roster = context.ai_roster();

    let league_drivers: Vec<Driver> = context
        .data
        .drivers
        .iter()
        .filter(|driver| !roster.contains(&driver.name))
        .cloned()
        .collect();
    let mut rates = podium_rates(&league_drivers, context.data.sessions.len());
    rates.truncate(PODIUM_RATE_ROWS);
    let report = InsightsReport {
        insights: league_insights(&league_drivers),
        progress: season_progress(&context.data, &roster, context.config.season_races),
        podium_rates: rates,
    };
    info!(
        drivers = league_drivers.len(),
        races = report.progress.races_completed,
        "insights computed"
    );

    if context.json {
        return write_json_stdout(&report);
    }
    let insights = &report.insights;

    let mut output = io::BufWriter::new(io::stdout().lock());
    match &insights.leader {
        Some(leader) => writeln!(
            output,
            "Championship leader: {} ({} pts)",
            leader.name,
            format_points(leader.points)
        )?,
        None => writeln!(output, "Championship leader: -")?,
    }
    match &insights.most_wins {
        Some(driver) => writeln!(output, "Most wins: {} ({} wins)", driver.name, driver.wins)?,
        None => writeln!(output, "Most wins: -")?,
    }
    match &insights.driver_to_watch {
        Some(watch) if watch.improvement > 0 => writeln!(
            output,
            "Driver to watch: {} (up {} places, now P{})",
            watch.name, watch.improvement, watch.current_rank
        )?,
        Some(watch) => writeln!(
            output,
            "Driver to watch: {} (P{}, watch for momentum)",
            watch.name, watch.current_rank
        )?,
        None => writeln!(output, "Driver to watch: -")?,
    }

    let progress = &report.progress;
    writeln!(
        output,
        "Season progress: {}/{} races ({:.0}%), {} active drivers",
        progress.races_completed,
        progress.season_races,
        progress.progress_percent,
        progress.active_drivers,
    )?;
    for rate in &report.podium_rates {
        match rate.rate {
            Some(percent) => writeln!(output, "\t{}\t{} podiums\t{percent:.0}%", rate.name, rate.podiums)?,
            None => writeln!(output, "\t{}\t{} podiums", rate.name, rate.podiums)?,
        }
    }
    output.flush()?;
    Ok(())
}
