use std::io::{self, Write};

use anyhow::Result;
use league_metrics::model::Driver;
use league_metrics::standings::{TeamStanding, team_standings};
use league_metrics::util::{format_points, write_json_stdout};
use tracing::info;

use crate::cli::TeamsArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: TeamsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let roster = context.ai_roster();

    let league_drivers: Vec<Driver> = context
        .data
        .drivers
        .iter()
        .filter(|driver| !roster.contains(&driver.name))
        .cloned()
        .collect();
    let teams = team_standings(&league_drivers, &context.data.sessions);
    info!(teams = teams.len(), drivers = league_drivers.len(), "team standings computed");

    if context.json {
        return write_json_stdout(&teams);
    }
    write_text(&teams)
}

fn write_text(teams: &[TeamStanding]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    if teams.is_empty() {
        writeln!(output, "Add drivers to the data file to unlock team-level analytics.")?;
        output.flush()?;
        return Ok(());
    }

    for team in teams {
        let avg_finish = team
            .avg_finish
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            output,
            "{}\t{} pts\tshare={:.0}%\twins={}\tpodiums={}\tfastest_laps={}\tavg_finish={}",
            team.name,
            format_points(team.points),
            team.points_share,
            team.wins,
            team.podiums,
            team.fastest_laps,
            avg_finish,
        )?;
        if team.drivers.is_empty() {
            writeln!(output, "\tdrivers: No registered drivers")?;
        } else {
            writeln!(output, "\tdrivers: {}", team.drivers.join(", "))?;
        }
        if let Some(top_driver) = team.top_driver() {
            writeln!(output, "\ttop driver: {top_driver}")?;
        }
    }

    output.flush()?;
    Ok(())
}
