use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::NamedHeadToHead;
use league_metrics::util::write_json_stdout;
use tracing::{info, warn};

use crate::cli::HeadToHeadArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: HeadToHeadArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;

    let comparison = metrics.head_to_head(&args.driver_a, &args.driver_b, metrics.round_count());
    match &comparison {
        Some(comparison) => info!(
            driver_a = %comparison.driver_a,
            driver_b = %comparison.driver_b,
            rounds = comparison.rounds,
            "head-to-head computed"
        ),
        None => warn!(
            driver_a = %args.driver_a,
            driver_b = %args.driver_b,
            "head-to-head needs two different drivers from the season results"
        ),
    }

    if context.json {
        return write_json_stdout(&comparison);
    }
    write_text(comparison.as_ref())
}

fn write_text(comparison: Option<&NamedHeadToHead>) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    let Some(comparison) = comparison else {
        writeln!(output, "Select two different drivers to compare their performances.")?;
        output.flush()?;
        return Ok(());
    };

    let summary = &comparison.summary;
    let ties = if summary.ties > 0 {
        format!(" ({} ties)", summary.ties)
    } else {
        String::new()
    };
    writeln!(
        output,
        "{} {}-{} {}{}",
        comparison.driver_a, summary.wins_a, summary.wins_b, comparison.driver_b, ties
    )?;

    match (comparison.best_finish_driver(), summary.best_finish) {
        (Some(driver), Some(best)) => {
            writeln!(output, "Best finish: {driver} (P{})", best.position)?
        }
        _ => writeln!(output, "No classified finishes yet")?,
    }

    match summary.average_gap {
        Some(gap) => {
            let favoured = if gap >= 0.0 {
                &comparison.driver_a
            } else {
                &comparison.driver_b
            };
            writeln!(
                output,
                "Average finishing gap: {:.2} places in favour of {favoured} over {} rounds",
                gap.abs(),
                summary.rounds_compared
            )?;
        }
        None => writeln!(output, "Insufficient data for average gap.")?,
    }

    output.flush()?;
    Ok(())
}
