use std::io::{self, Write};

use anyhow::Result;
use league_metrics::standings::{StandingEntry, driver_standings, without_ai};
use league_metrics::util::{format_points, write_json_stdout};
use tracing::info;

use crate::cli::StandingsArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: StandingsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;

    let mut entries = driver_standings(&context.data.drivers, args.sort.into());
    if args.hide_ai {
        entries = without_ai(entries, &context.ai_roster());
    }
    info!(entries = entries.len(), hide_ai = args.hide_ai, "standings computed");

    if context.json {
        return write_json_stdout(&entries);
    }
    write_text(&entries)
}

fn write_text(entries: &[StandingEntry]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    if entries.is_empty() {
        writeln!(output, "No driver data available for the current filters.")?;
        output.flush()?;
        return Ok(());
    }

    writeln!(output, "Pos\tChange\tDriver\tCode\tTeam\tPts\tWins\tPodiums\tFL")?;
    for entry in entries {
        let change = match entry.rank_change {
            Some(change) if change > 0 => format!("+{change}"),
            Some(change) => change.to_string(),
            None => "-".to_string(),
        };
        let driver = &entry.driver;
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            entry.rank,
            change,
            driver.name,
            driver.code,
            driver.team,
            format_points(driver.points),
            driver.wins,
            driver.podiums,
            driver.fastest_laps,
        )?;
    }

    output.flush()?;
    Ok(())
}
