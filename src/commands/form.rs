use std::io::{self, Write};

use anyhow::Result;
use league_metrics::metrics::{DriverForm, FormEntry, driver_form};
use league_metrics::util::{format_points, format_position, write_json_stdout};
use tracing::info;

use crate::cli::FormArgs;
use crate::commands::context::LeagueContext;

pub fn run(args: FormArgs) -> Result<()> {
    let context = LeagueContext::load(&args.source)?;
    let metrics = context.season_metrics(&args.window)?;
    let roster = context.ai_roster();
    let last = args.last.unwrap_or(context.config.form_rounds);

    let form: Vec<DriverForm> = driver_form(&metrics, last)
        .into_iter()
        .filter(|entry| !roster.contains(&entry.driver))
        .take(args.top)
        .collect();
    info!(drivers = form.len(), last, "form guide computed");

    if context.json {
        return write_json_stdout(&form);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if form.is_empty() {
        writeln!(output, "Recent form will populate when sessions are recorded.")?;
        output.flush()?;
        return Ok(());
    }

    for entry in &form {
        let chips: Vec<String> = entry.recent.iter().map(form_chip).collect();
        writeln!(
            output,
            "{}\t{}\t{}\tlast {} avg={}\tseason avg={}\tbest={}",
            entry.driver,
            entry.team,
            chips.join(" "),
            entry.recent.len(),
            points_average(entry.recent_average),
            points_average(entry.season_average),
            format_position(entry.best_finish),
        )?;
    }
    output.flush()?;
    Ok(())
}

fn form_chip(entry: &FormEntry) -> String {
    match &entry.result {
        None => "-".to_string(),
        Some(result) => match result.position {
            Some(_) => format_position(result.position),
            None if result.points > 0.0 => format_points(result.points),
            None => "NC".to_string(),
        },
    }
}

fn points_average(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1} pts"),
        None => "0.0 pts".to_string(),
    }
}
