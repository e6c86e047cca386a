use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::{
    FastestLapForm, FastestLapHighlights, fastest_lap_form, fastest_lap_highlights,
};
use league_metrics::util::{format_average, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::FastestLapsArgs;
use crate::commands::context::LeagueContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FastestLapReport {
    drivers: Vec<FastestLapForm>,
    highlights: FastestLapHighlights,
}

pub fn run(args: FastestLapsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;

    let drivers = fastest_lap_form(&metrics);
    let highlights = fastest_lap_highlights(&drivers);
    info!(drivers = drivers.len(), "fastest lap form computed");

    let report = FastestLapReport {
        drivers,
        highlights,
    };
    if context.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if report.drivers.is_empty() {
        writeln!(output, "No fastest lap data available yet.")?;
        output.flush()?;
        return Ok(());
    }

    writeln!(output, "Driver\tTeam\tFastest laps\tAvg finish")?;
    for entry in &report.drivers {
        writeln!(
            output,
            "{}\t{}\t{}\t{}",
            entry.driver,
            entry.team,
            entry.count,
            format_average(entry.avg_finish)
        )?;
    }

    let highlights = &report.highlights;
    if let Some(standout) = &highlights.standout {
        match standout.avg_finish {
            Some(avg) => writeln!(output, "Fastest Lap Standout: {} (avg finish {avg:.2})", standout.driver)?,
            None => writeln!(output, "Fastest Lap Standout: {} (limited data)", standout.driver)?,
        }
    }
    if let Some(most) = &highlights.most_fastest_laps {
        writeln!(output, "Most Fastest Laps: {} x {}", most.count, most.driver)?;
    }
    if let Some(best) = &highlights.best_average {
        writeln!(
            output,
            "Best Finishing Form: {} (avg finish {})",
            best.driver,
            format_average(best.avg_finish)
        )?;
    }
    output.flush()?;
    Ok(())
}
