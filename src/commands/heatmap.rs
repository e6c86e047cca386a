use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::heatmap_order;
use league_metrics::util::{format_position, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::HeatmapArgs;
use crate::commands::context::LeagueContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatmapRow<'a> {
    driver: &'a str,
    team: &'a str,
    positions: &'a [Option<u32>],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Heatmap<'a> {
    rounds: Vec<&'a str>,
    max_position: u32,
    rows: Vec<HeatmapRow<'a>>,
}

pub fn run(args: HeatmapArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;

    let heatmap = Heatmap {
        rounds: metrics.rounds.iter().map(|round| round.name.as_str()).collect(),
        max_position: metrics.max_position,
        rows: heatmap_order(&metrics, args.sort.into())
            .into_iter()
            .map(|stats| HeatmapRow {
                driver: &stats.name,
                team: &stats.team,
                positions: &stats.positions,
            })
            .collect(),
    };
    info!(rows = heatmap.rows.len(), rounds = heatmap.rounds.len(), "heatmap ready");

    if context.json {
        return write_json_stdout(&heatmap);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if heatmap.rounds.is_empty() {
        writeln!(output, "No race results to display yet.")?;
        output.flush()?;
        return Ok(());
    }

    let header: Vec<String> = (1..=heatmap.rounds.len())
        .map(|round| format!("R{round}"))
        .collect();
    writeln!(output, "Driver\tTeam\t{}", header.join("\t"))?;
    for row in &heatmap.rows {
        let cells: Vec<String> = row
            .positions
            .iter()
            .map(|position| format_position(*position))
            .collect();
        writeln!(output, "{}\t{}\t{}", row.driver, row.team, cells.join("\t"))?;
    }
    output.flush()?;
    Ok(())
}
