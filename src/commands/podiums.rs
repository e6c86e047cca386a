use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::podium_breakdown;
use league_metrics::util::write_json_stdout;
use tracing::info;

use crate::cli::PodiumsArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: PodiumsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;

    let mut breakdown = podium_breakdown(&metrics, metrics.round_count());
    if let Some(limit) = args.top.limit() {
        breakdown.truncate(limit);
    }
    info!(drivers = breakdown.len(), "podium breakdown computed");

    if context.json {
        return write_json_stdout(&breakdown);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Driver\tWins\tP2\tP3\tP4-P10\tP11+")?;
    for entry in &breakdown {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.driver, entry.wins, entry.second, entry.third, entry.top_ten, entry.rest
        )?;
    }
    output.flush()?;
    Ok(())
}
