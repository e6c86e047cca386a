use std::io::{self, Write};

use anyhow::Result;
use league_metrics::model::SessionResult;
use league_metrics::util::{format_points, format_position, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::SessionsArgs;
use crate::commands::context::LeagueContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary<'a> {
    name: &'a str,
    date: &'a str,
    winner: Option<&'a SessionResult>,
    podium: Vec<&'a SessionResult>,
    highlights: &'a [String],
    results: Vec<&'a SessionResult>,
}

pub fn run(args: SessionsArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let roster = context.ai_roster();

    let mut ordered = context.data.sessions_recent_first();
    if args.recent {
        ordered.truncate(context.config.recent_sessions);
    }

    let summaries: Vec<SessionSummary<'_>> = ordered
        .into_iter()
        .map(|session| {
            let results: Vec<&SessionResult> = session
                .results
                .iter()
                .filter(|result| !roster.contains(&result.driver))
                .collect();
            SessionSummary {
                name: &session.name,
                date: &session.date,
                winner: session.winner(|driver| !roster.contains(driver)),
                podium: results.iter().take(3).copied().collect(),
                highlights: &session.highlights,
                results,
            }
        })
        .collect();
    info!(sessions = summaries.len(), recent = args.recent, "session listing ready");

    if context.json {
        return write_json_stdout(&summaries);
    }
    write_text(&summaries)
}

fn write_text(summaries: &[SessionSummary<'_>]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    if summaries.is_empty() {
        writeln!(output, "No sessions recorded yet.")?;
        output.flush()?;
        return Ok(());
    }

    for summary in summaries {
        let date = if summary.date.is_empty() { "TBD" } else { summary.date };
        writeln!(output, "{date}\t{}", summary.name)?;
        if let Some(winner) = summary.winner {
            writeln!(output, "\twinner: {}", winner.driver)?;
        }
        for highlight in summary.highlights {
            writeln!(output, "\thighlight: {highlight}")?;
        }
        for result in &summary.results {
            let fastest = if result.fastest_lap { "\tfastest lap" } else { "" };
            writeln!(
                output,
                "\t{}\t{}\t{} pts{}",
                format_position(result.position),
                result.driver,
                format_points(result.points),
                fastest,
            )?;
        }
    }

    output.flush()?;
    Ok(())
}
