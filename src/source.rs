use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::classify::classify_records;
use crate::decode::decode_records;
use crate::model::LeagueData;

pub fn read_source(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    String::from_utf8(raw).with_context(|| format!("source is not valid UTF-8: {}", path.display()))
}

pub fn parse_league(text: &str) -> LeagueData {
    classify_records(&decode_records(text))
}

pub fn load_league(path: &Path) -> Result<LeagueData> {
    let text = read_source(path)?;
    let data = parse_league(&text);

    info!(
        path = %path.display(),
        drivers = data.drivers.len(),
        sessions = data.sessions.len(),
        results = data.result_count(),
        "loaded league data"
    );

    Ok(data)
}

pub fn load_league_or_empty(path: &Path) -> LeagueData {
    match load_league(path) {
        Ok(data) => data,
        Err(err) => {
            error!(error = %err, "unable to load league data");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            LeagueData::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{load_league, load_league_or_empty, parse_league};

    #[test]
    fn missing_source_degrades_to_empty_model() {
        let path = Path::new("definitely/not/here/league-data.csv");

        assert!(load_league(path).is_err());
        assert!(load_league_or_empty(path).is_empty());
    }

    #[test]
    fn parse_league_runs_decode_and_classify() {
        let data = parse_league(
            "recordType,driverName,team,points\ndriver,Alice,Ferrari,10\nsession-result,Alice,,25\n",
        );

        assert_eq!(data.drivers.len(), 1);
        assert_eq!(data.sessions.len(), 1);
        assert_eq!(data.sessions[0].results[0].points, 25.0);
    }

    #[test]
    fn spreadsheet_export_with_byte_order_mark_still_loads() {
        let data = parse_league("\u{FEFF}recordType,driverName,points\ndriver,Alice,10\ndriver,Bob,5\n");

        assert_eq!(data.drivers.len(), 2);
    }
}
