use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::SeasonMetrics;
use league_metrics::util::{
    format_average, format_points, format_position, write_json_pretty, write_json_stdout,
};
use tracing::info;

use crate::cli::SeasonArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: SeasonArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;

    if let Some(path) = &args.output {
        write_json_pretty(path, &metrics)?;
        info!(path = %path.display(), "wrote season metrics");
    }

    if context.json {
        return write_json_stdout(&metrics);
    }
    write_text(&metrics, args.summary)
}

fn write_text(metrics: &SeasonMetrics, summary_only: bool) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    if metrics.rounds.is_empty() {
        writeln!(output, "No race results to display yet.")?;
        output.flush()?;
        return Ok(());
    }

    writeln!(output, "Rounds: {}", metrics.round_count())?;
    for round in &metrics.rounds {
        writeln!(output, "\tR{}\t{}\t{}", round.index + 1, round.date, round.name)?;
    }

    writeln!(output, "Driver\tTeam\tPts\tPts/race\tWins\tPodiums\tFL\tRaces\tAvg\tBest")?;
    for stats in metrics.drivers_by_points() {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            stats.name,
            stats.team,
            format_points(stats.total_points),
            format_average(stats.points_per_race),
            stats.wins,
            stats.podiums,
            stats.fastest_lap_count,
            stats.race_count,
            format_average(stats.avg_finish),
            format_position(stats.best_finish),
        )?;

        if summary_only {
            continue;
        }
        for index in 0..metrics.round_count() {
            writeln!(
                output,
                "\tR{}\t{}\t+{}\ttotal={}\tgap={}",
                index + 1,
                format_position(stats.positions[index]),
                format_points(stats.points_earned[index]),
                format_points(stats.cumulative_points[index]),
                format_points(stats.gap_to_leader[index]),
            )?;
        }
    }

    writeln!(output, "Teams:")?;
    for team in &metrics.teams {
        writeln!(output, "\t{}\t{} pts", team.name, format_points(team.total_points))?;
    }

    output.flush()?;
    Ok(())
}
