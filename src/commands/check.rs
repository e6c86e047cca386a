use std::io::{self, Write};

use anyhow::Result;
use league_metrics::classify::classify_records;
use league_metrics::config::LeagueConfig;
use league_metrics::decode::decode_records;
use league_metrics::source::read_source;
use league_metrics::util::{now_utc_string, sha256_hex, write_json_stdout};
use serde::Serialize;
use tracing::info;

use crate::cli::CheckArgs;

#[derive(Debug, Serialize)]
struct CheckReport {
    generated_at: String,
    source: String,
    sha256: String,
    record_count: usize,
    driver_count: usize,
    session_count: usize,
    result_count: usize,
    undated_sessions: Vec<String>,
    ai_driver_count: usize,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let config = LeagueConfig::load(args.source.config.as_deref())?;
    let text = read_source(&args.source.data)?;
    let records = decode_records(&text);
    let data = classify_records(&records);
    let roster = config.ai_roster();

    let report = CheckReport {
        generated_at: now_utc_string(),
        source: args.source.data.display().to_string(),
        sha256: sha256_hex(text.as_bytes()),
        record_count: records.len(),
        driver_count: data.drivers.len(),
        session_count: data.sessions.len(),
        result_count: data.result_count(),
        undated_sessions: data
            .sessions
            .iter()
            .filter(|session| session.parsed_date().is_none())
            .map(|session| session.name.clone())
            .collect(),
        ai_driver_count: data
            .drivers
            .iter()
            .filter(|driver| roster.contains(&driver.name))
            .count(),
    };

    info!(
        records = report.record_count,
        drivers = report.driver_count,
        sessions = report.session_count,
        results = report.result_count,
        "check completed"
    );

    if args.source.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Source: {}", report.source)?;
    writeln!(output, "sha256: {}", report.sha256)?;
    writeln!(
        output,
        "Records: {} drivers={} (ai={}) sessions={} results={}",
        report.record_count,
        report.driver_count,
        report.ai_driver_count,
        report.session_count,
        report.result_count,
    )?;
    for name in &report.undated_sessions {
        writeln!(output, "\tundated session: {name}")?;
    }
    output.flush()?;
    Ok(())
}
